//! Policy configuration subsystem.
//!
//! # Data Flow
//! ```text
//! policy file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PolicyConfig (validated, immutable)
//!     → routing (compiled into routes)
//!
//! In watch mode:
//!     watcher.rs detects change
//!     → loader.rs loads new policy
//!     → validation.rs validates
//!     → new PolicyConfig sent to the compile loop
//! ```
//!
//! # Design Decisions
//! - Policy is immutable once loaded; changes require full reload
//! - All platform fields have defaults to allow minimal policies
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_policy, parse_policy, ConfigError};
pub use schema::{AuthConfig, LoggingConfig, PlatformConfig, PolicyConfig};
pub use validation::ValidationError;
