//! Lookups the route compiler delegates to.
//!
//! # Responsibilities
//! - Derive a site's platform main domain
//! - Locate a branch's content root
//! - Generate stable route identifiers
//! - Build auth handlers, redirect routes and 404 error routes
//!
//! # Design Decisions
//! - Injected as a trait object so the compiler holds no process-wide state
//! - Every lookup is deterministic for a given configuration
//! - Failures propagate to the caller; nothing is retried or defaulted

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::schema::PlatformConfig;
use crate::routing::error::{CompileError, CompileResult};
use crate::routing::route::{
    Account, AuthProviders, Handler, HashConfig, HttpBasicAuth, MatcherSet, Route, StatusCode,
};
use crate::site::{Branch, Password, Redirect, RedirectKind, Site, SiteDomain};

/// Collaborators consumed by the branch route compiler.
pub trait RouteCollaborators {
    /// Hostname the platform serves the site under.
    fn main_domain(&self, site: &Site) -> CompileResult<String>;

    /// Directory the branch's content is served from.
    fn branch_dir(&self, site_id: &str, branch_id: &str) -> CompileResult<String>;

    /// Identifier unique per (site, branch) pair.
    fn branch_route_id(&self, site: &Site, branch: &Branch) -> CompileResult<String>;

    /// Handler that challenges with a 401 on missing or wrong credentials.
    fn auth_handler(&self, password: &Password) -> CompileResult<Handler>;

    /// Independently matchable route for one redirect rule.
    fn redirect_route(&self, site: &Site, branch: &Branch, redirect: &Redirect)
        -> CompileResult<Route>;

    /// Error route handling the 404 status for a branch.
    fn not_found_route(&self, site: &Site, branch: &Branch) -> CompileResult<Route>;

    /// Uniqueness predicate used when deduplicating a site's domains.
    fn same_domain(&self, a: &SiteDomain, b: &SiteDomain) -> bool {
        a.same_host(b)
    }
}

/// Collaborators backed by the platform section of the policy file.
#[derive(Debug, Clone)]
pub struct PlatformCollaborators {
    config: PlatformConfig,
}

impl PlatformCollaborators {
    pub fn new(config: PlatformConfig) -> Self {
        Self { config }
    }

    fn file_server(&self, site: &Site, branch: &Branch) -> CompileResult<Handler> {
        Ok(Handler::FileServer {
            root: self.branch_dir(&site.id, &branch.id)?,
        })
    }
}

fn check_segment(segment: &str) -> CompileResult<&str> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(CompileError::InvalidPathSegment(segment.to_string()));
    }
    Ok(segment)
}

impl RouteCollaborators for PlatformCollaborators {
    fn main_domain(&self, site: &Site) -> CompileResult<String> {
        if site.name.is_empty() {
            return Err(CompileError::MissingSiteName(site.id.clone()));
        }
        Ok(format!("{}.{}", site.name, self.config.sites_domain))
    }

    fn branch_dir(&self, site_id: &str, branch_id: &str) -> CompileResult<String> {
        Ok(format!(
            "{}/{}/{}",
            self.config.sites_dir.trim_end_matches('/'),
            check_segment(site_id)?,
            check_segment(branch_id)?,
        ))
    }

    fn branch_route_id(&self, site: &Site, branch: &Branch) -> CompileResult<String> {
        Ok(format!("{}{}-{}", self.config.id_prefix, site.id, branch.id))
    }

    fn auth_handler(&self, password: &Password) -> CompileResult<Handler> {
        if password.hash().is_empty() {
            return Err(CompileError::EmptyPassword);
        }
        Ok(Handler::Authentication {
            providers: AuthProviders {
                http_basic: Some(HttpBasicAuth {
                    hash: HashConfig {
                        algorithm: "bcrypt".to_string(),
                    },
                    accounts: vec![Account {
                        username: self.config.auth.username.clone(),
                        password: STANDARD.encode(password.hash()),
                    }],
                    realm: self.config.auth.realm.clone(),
                }),
            },
        })
    }

    fn redirect_route(
        &self,
        site: &Site,
        branch: &Branch,
        redirect: &Redirect,
    ) -> CompileResult<Route> {
        let handle = match &redirect.kind {
            RedirectKind::Url { to, permanent } => {
                let mut headers = BTreeMap::new();
                headers.insert("Location".to_string(), vec![to.clone()]);
                vec![Handler::StaticResponse {
                    status_code: Some(StatusCode::Code(if *permanent { 301 } else { 302 })),
                    headers,
                    body: None,
                }]
            }
            RedirectKind::File { file } => vec![
                Handler::Rewrite {
                    uri: format!("/{}", file.trim_start_matches('/')),
                },
                self.file_server(site, branch)?,
            ],
        };
        Ok(Route::new(handle).with_match(MatcherSet::path(redirect.path.clone())))
    }

    fn not_found_route(&self, site: &Site, branch: &Branch) -> CompileResult<Route> {
        Ok(Route::new(vec![
            Handler::Rewrite {
                uri: self.config.not_found_page.clone(),
            },
            self.file_server(site, branch)?,
        ])
        .with_match(MatcherSet::expression("{http.error.status_code} == 404")))
    }
}
