//! Backend API access.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → ForwardRequest (method, path segments, query, body, headers)
//!     → client.rs (build URL on the configured origin, one outbound call)
//!     → UpstreamResponse (status + JSON) or UpstreamError
//!     → http::response (relay or uniform error shape)
//! ```

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{ForwardBody, ForwardRequest, UpstreamError, UpstreamResponse, UpstreamResult};
