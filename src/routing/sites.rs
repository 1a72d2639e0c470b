//! Site-level driver.

use crate::routing::branch::branch_route;
use crate::routing::collaborators::RouteCollaborators;
use crate::routing::error::CompileResult;
use crate::routing::route::Route;
use crate::site::Site;

/// One route per branch, in branch order. A site without branches yields none.
pub fn site_routes(
    site: &Site,
    collaborators: &dyn RouteCollaborators,
) -> CompileResult<Vec<Route>> {
    let routes = site
        .branches
        .iter()
        .map(|branch| branch_route(site, branch, collaborators))
        .collect::<CompileResult<Vec<_>>>()?;
    tracing::debug!(site = %site.id, routes = routes.len(), "Compiled site");
    Ok(routes)
}

/// Routes of every site, concatenated in input order.
pub fn compile_sites(
    sites: &[Site],
    collaborators: &dyn RouteCollaborators,
) -> CompileResult<Vec<Route>> {
    let mut routes = Vec::new();
    for site in sites {
        routes.extend(site_routes(site, collaborators)?);
    }
    tracing::debug!(sites = sites.len(), routes = routes.len(), "Compiled site routes");
    Ok(routes)
}

/// Serialise routes to the server's JSON route array.
pub fn routes_json(routes: &[Route], pretty: bool) -> CompileResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(routes)?
    } else {
        serde_json::to_string(routes)?
    };
    Ok(json)
}
