//! Configuration schema definitions.
//!
//! This module defines the complete policy file structure: platform settings
//! consumed by the route collaborators, logging settings, and the sites.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::site::Site;

/// Root of a policy file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PolicyConfig {
    /// Platform-wide settings (hostnames, content layout, auth).
    pub platform: PlatformConfig,

    /// Logging settings for the CLI.
    pub logging: LoggingConfig,

    /// Tenants to compile routes for.
    pub sites: Vec<Site>,
}

/// Platform settings shared by every site.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Parent domain of every site's main domain (`<site>.<sites_domain>`).
    pub sites_domain: String,

    /// Directory holding `<site-id>/<branch-id>` content roots.
    pub sites_dir: String,

    /// Prefix of generated `@id` values.
    pub id_prefix: String,

    /// Page served for 404 errors, relative to the branch content root.
    pub not_found_page: String,

    pub auth: AuthConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            sites_domain: "sites.localhost".to_string(),
            sites_dir: "/sites".to_string(),
            id_prefix: "branch-".to_string(),
            not_found_page: "/404.html".to_string(),
            auth: AuthConfig::default(),
        }
    }
}

/// Basic-auth settings for password-protected branches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Username expected alongside the site or branch password.
    pub username: String,

    /// Realm advertised in the 401 challenge.
    pub realm: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "user".to_string(),
            realm: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,

    /// Include event targets in log lines.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "site_routes=info".to_string(),
            with_target: false,
        }
    }
}
