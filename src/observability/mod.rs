//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, routing, CLI
//!     → tracing events (structured fields: site, branch, counts)
//!     → logging.rs subscriber
//!     → stderr (stdout is reserved for generated routes)
//! ```

pub mod logging;

pub use logging::init_logging;
