//! Per-tenant route compiler for a static-site reverse proxy.
//!
//! Turns a declarative policy of sites, branches and domains into the
//! server's host-based JSON route tree.

pub mod config;
pub mod observability;
pub mod routing;
pub mod site;

pub use config::PolicyConfig;
pub use routing::{compile_sites, PlatformCollaborators, Route, RouteCollaborators};
pub use site::Site;
