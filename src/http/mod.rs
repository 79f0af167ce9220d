//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, body limit)
//!     → request.rs (request ID extractor, body parsing)
//!     → routes/* (build ForwardRequest, call backend)
//!     → response.rs (relay body or uniform error shape)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use response::ErrorShape;
pub use server::{AppState, HttpServer};
