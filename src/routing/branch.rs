//! Branch route assembly.
//!
//! # Route layout
//! ```text
//! Route  @id, group = site.id, match host = branch hosts
//! ├── handle: subroute (first match short-circuits)
//! │   ├── auth          (only with an effective password)
//! │   ├── redirect × N  (declared order)
//! │   └── content
//! └── errors
//!     ├── 401 → static "not authenticated"
//!     └── 404 → branch not-found route
//! ```
//!
//! Error routes sit on the outer route, never on the subroute: an error block
//! inside the subroute swallows the auth handler's 401 challenge.

use crate::routing::collaborators::RouteCollaborators;
use crate::routing::content::content_route;
use crate::routing::domains::resolve_domains;
use crate::routing::error::CompileResult;
use crate::routing::hosts::branch_hosts;
use crate::routing::route::{ErrorRoutes, Handler, MatcherSet, Route, StatusCode};
use crate::site::{Branch, Site};

pub const NOT_AUTHENTICATED_BODY: &str = "not authenticated";

/// Compile the top-level route for one branch of `site`.
pub fn branch_route(
    site: &Site,
    branch: &Branch,
    collaborators: &dyn RouteCollaborators,
) -> CompileResult<Route> {
    let domains = resolve_domains(site, collaborators)?;
    let hosts = branch_hosts(&domains, branch, site);

    let mut routes = Vec::with_capacity(branch.redirects.len() + 2);
    if let Some(password) = site.effective_password(branch) {
        routes.push(Route::new(vec![collaborators.auth_handler(password)?]));
    }
    for redirect in &branch.redirects {
        routes.push(collaborators.redirect_route(site, branch, redirect)?);
    }
    routes.push(content_route(site, branch, collaborators)?);

    let errors = ErrorRoutes {
        routes: vec![
            unauthenticated_route(),
            collaborators.not_found_route(site, branch)?,
        ],
    };

    tracing::debug!(
        site = %site.id,
        branch = %branch.id,
        hosts = hosts.len(),
        subroutes = routes.len(),
        "Compiled branch route"
    );
    if hosts.is_empty() {
        tracing::warn!(
            site = %site.id,
            branch = %branch.id,
            "Branch is not reachable on any host"
        );
    }

    Ok(Route {
        id: Some(collaborators.branch_route_id(site, branch)?),
        group: Some(site.id.clone()),
        matchers: vec![MatcherSet::host(hosts)],
        handle: vec![Handler::Subroute { routes }],
        errors: Some(errors),
    })
}

/// Echoes the 401 status with a fixed plaintext body.
fn unauthenticated_route() -> Route {
    Route::new(vec![Handler::StaticResponse {
        status_code: Some(StatusCode::Placeholder(
            "{http.error.status_code}".to_string(),
        )),
        headers: Default::default(),
        body: Some(NOT_AUTHENTICATED_BODY.to_string()),
    }])
    .with_match(MatcherSet::expression("{http.error.status_code} == 401"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PlatformConfig;
    use crate::routing::collaborators::PlatformCollaborators;
    use crate::site::{Password, Redirect, RedirectKind};

    fn site() -> Site {
        Site {
            id: "s1".into(),
            name: "blog".into(),
            main_branch: "b1".into(),
            spa: false,
            password: None,
            domains: Vec::new(),
            headers: Vec::new(),
            branches: Vec::new(),
        }
    }

    fn branch() -> Branch {
        Branch {
            id: "b1".into(),
            name: String::new(),
            slug: "prod".into(),
            password: None,
            redirects: Vec::new(),
            headers: Vec::new(),
        }
    }

    fn redirect(path: &str) -> Redirect {
        Redirect {
            id: path.into(),
            path: path.into(),
            kind: RedirectKind::Url {
                to: "https://example.com".into(),
                permanent: true,
            },
        }
    }

    fn collaborators() -> PlatformCollaborators {
        PlatformCollaborators::new(PlatformConfig {
            sites_domain: "sites.test".into(),
            ..PlatformConfig::default()
        })
    }

    #[test]
    fn test_minimal_branch_route() {
        let route = branch_route(&site(), &branch(), &collaborators()).unwrap();
        assert_eq!(route.id.as_deref(), Some("branch-s1-b1"));
        assert_eq!(route.group.as_deref(), Some("s1"));
        assert_eq!(
            route.hosts().unwrap(),
            ["prod.blog.sites.test", "blog.sites.test"]
        );
        assert_eq!(route.subroutes().unwrap().len(), 1);
        assert_eq!(route.errors.unwrap().routes.len(), 2);
    }

    #[test]
    fn test_auth_precedes_redirects_and_content() {
        let mut site = site();
        site.password = Some(Password::new("hash"));
        let mut branch = branch();
        branch.redirects = vec![redirect("/a"), redirect("/b")];

        let route = branch_route(&site, &branch, &collaborators()).unwrap();
        let subroutes = route.subroutes().unwrap();
        assert_eq!(subroutes.len(), 4);
        assert_eq!(subroutes[0].handle[0].name(), "authentication");
        assert_eq!(subroutes[1].matchers, vec![MatcherSet::path("/a")]);
        assert_eq!(subroutes[2].matchers, vec![MatcherSet::path("/b")]);
        assert_eq!(subroutes[3].handle.last().unwrap().name(), "file_server");
    }

    #[test]
    fn test_unauthenticated_route_shape() {
        let route = unauthenticated_route();
        assert_eq!(
            route.matchers,
            vec![MatcherSet::expression("{http.error.status_code} == 401")]
        );
        assert_eq!(
            serde_json::to_value(&route.handle[0]).unwrap(),
            serde_json::json!({
                "handler": "static_response",
                "status_code": "{http.error.status_code}",
                "body": "not authenticated",
            })
        );
    }
}
