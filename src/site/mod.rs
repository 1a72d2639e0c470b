//! Tenant domain model.
//!
//! # Data Flow
//! ```text
//! policy file (TOML)
//!     → config::loader (deserialize + validate)
//!     → Site[] (read-only, owns Branch[] and SiteDomain[])
//!     → routing (compiled into Route trees, never mutated)
//! ```
//!
//! # Design Decisions
//! - Purely structural: no behaviour beyond small lookups
//! - SSL configuration is a closed tagged enum, not an open record
//! - Password hashes are redacted from `Debug` output

pub mod types;

pub use types::{
    Branch, Header, Password, Redirect, RedirectKind, Site, SiteDomain, SslConfiguration,
};
