//! Tourism website API gateway library.
//!
//! Forwards the site's `/api/...` routes to the backend API of record and
//! relays its answers under a uniform JSON error convention.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::BackendClient;
