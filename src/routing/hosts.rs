//! Host list construction for a branch route.

use crate::site::{Branch, Site, SiteDomain};

/// Hostnames selecting `branch`.
///
/// Every domain exposing branches contributes `<slug>.<domain>`. The main
/// branch additionally answers on the bare name of every resolved domain.
/// Subdomain entries come first; duplicates are left to the server.
pub fn branch_hosts(domains: &[SiteDomain], branch: &Branch, site: &Site) -> Vec<String> {
    let mut hosts: Vec<String> = domains
        .iter()
        .filter(|domain| domain.expose_branches)
        .map(|domain| format!("{}.{}", branch.slug, domain.name))
        .collect();

    if site.is_main_branch(branch) {
        hosts.extend(domains.iter().map(|domain| domain.name.clone()));
    }
    hosts
}
