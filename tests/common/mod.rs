//! Shared fixtures for integration tests.

#![allow(dead_code)]

use site_routes::config::PlatformConfig;
use site_routes::site::{Branch, Header, Password, Redirect, RedirectKind, Site, SiteDomain, SslConfiguration};
use site_routes::PlatformCollaborators;

pub const SITES_DOMAIN: &str = "sites.test";

/// Collaborators with `sites.test` as the platform domain and `/sites` as root.
pub fn collaborators() -> PlatformCollaborators {
    PlatformCollaborators::new(PlatformConfig {
        sites_domain: SITES_DOMAIN.to_string(),
        ..PlatformConfig::default()
    })
}

/// Site `s1` named `blog` with main branch `b1` and no branches yet.
pub fn site() -> Site {
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

pub fn branch(id: &str, slug: &str) -> Branch {
    Branch {
        id: id.into(),
        name: slug.into(),
        slug: slug.into(),
        password: None,
        redirects: Vec::new(),
        headers: Vec::new(),
    }
}

pub fn domain(name: &str, expose_branches: bool) -> SiteDomain {
    SiteDomain {
        name: name.into(),
        expose_branches,
        ssl: SslConfiguration::Acme,
    }
}

pub fn custom_cert_domain(name: &str, expose_branches: bool) -> SiteDomain {
    SiteDomain {
        name: name.into(),
        expose_branches,
        ssl: SslConfiguration::Custom {
            certificate: format!("/certs/{}.pem", name),
            key: format!("/certs/{}.key", name),
        },
    }
}

pub fn url_redirect(path: &str, to: &str) -> Redirect {
    Redirect {
        id: path.into(),
        path: path.into(),
        kind: RedirectKind::Url {
            to: to.into(),
            permanent: false,
        },
    }
}

pub fn header(name: &str, value: &str) -> Header {
    Header::new(name, value)
}

pub fn password(hash: &str) -> Option<Password> {
    Some(Password::new(hash))
}
