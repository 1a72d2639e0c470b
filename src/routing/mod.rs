//! Route compilation subsystem.
//!
//! # Data Flow
//! ```text
//! Site + Branch (validated policy)
//!     → domains.rs (custom domains + platform domain, deduplicated)
//!     → hosts.rs (branch subdomains, bare names for the main branch)
//!     → content.rs (headers → encode → file_server, optional SPA rewrite)
//!     → branch.rs (auth → redirects → content subroute, 401/404 errors)
//!     → sites.rs (one route per branch)
//!     → Route tree (serialised to the server's JSON config)
//! ```
//!
//! # Design Decisions
//! - Pure functions of (site, branch, collaborators); no retained state
//! - Collaborators injected through `RouteCollaborators`
//! - Routes carry `group = site.id` so sites never shadow each other
//! - No local recovery: collaborator errors abort the whole compilation

pub mod branch;
pub mod collaborators;
pub mod content;
pub mod domains;
pub mod error;
pub mod hosts;
pub mod route;
pub mod sites;

pub use branch::branch_route;
pub use collaborators::{PlatformCollaborators, RouteCollaborators};
pub use error::{CompileError, CompileResult};
pub use route::Route;
pub use sites::{compile_sites, routes_json, site_routes};
