//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every route log line
//! - Metrics are optional; recording is free when no exporter is installed

pub mod logging;
pub mod metrics;
