//! Domain resolution.
//!
//! A site is reachable through its custom domains plus one synthesized
//! platform domain. Custom domains come first, so a custom entry naming the
//! platform hostname keeps its own settings and the synthesized one is dropped.

use crate::routing::collaborators::RouteCollaborators;
use crate::routing::error::CompileResult;
use crate::site::{Site, SiteDomain};

/// Ordered, deduplicated domains routing to `site`.
pub fn resolve_domains(
    site: &Site,
    collaborators: &dyn RouteCollaborators,
) -> CompileResult<Vec<SiteDomain>> {
    let platform = SiteDomain::platform(collaborators.main_domain(site)?);

    let mut resolved: Vec<SiteDomain> = Vec::with_capacity(site.domains.len() + 1);
    for domain in site.domains.iter().chain(std::iter::once(&platform)) {
        if !resolved.iter().any(|seen| collaborators.same_domain(seen, domain)) {
            resolved.push(domain.clone());
        }
    }
    tracing::debug!(site = %site.id, domains = resolved.len(), "Resolved site domains");
    Ok(resolved)
}
