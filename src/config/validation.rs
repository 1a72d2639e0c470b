//! Policy validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (main branch references an existing branch)
//! - Reject ids, slugs and hostnames the route compiler cannot use
//! - Detect duplicate sites, branches and slugs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PolicyConfig → Result<(), Vec<ValidationError>>
//! - Runs before a policy is handed to the route compiler

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::PolicyConfig;
use crate::site::{Branch, Site};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("platform.sites_domain must not be empty")]
    EmptySitesDomain,

    #[error("platform.sites_domain {0:?} is not a valid hostname")]
    InvalidSitesDomain(String),

    #[error("duplicate site id {0:?}")]
    DuplicateSite(String),

    #[error("site {site:?}: {field} must not be empty")]
    EmptyField { site: String, field: &'static str },

    #[error("site {site:?}: {field} {id:?} cannot be used as a directory name")]
    InvalidId {
        site: String,
        field: &'static str,
        id: String,
    },

    #[error("site {site:?}: name {name:?} is not a valid DNS label")]
    InvalidSiteName { site: String, name: String },

    #[error("site {site:?}: duplicate branch id {branch:?}")]
    DuplicateBranch { site: String, branch: String },

    #[error("site {site:?}: duplicate branch slug {slug:?}")]
    DuplicateSlug { site: String, slug: String },

    #[error("site {site:?}: main branch {branch:?} does not exist")]
    UnknownMainBranch { site: String, branch: String },

    #[error("site {site:?}: slug {slug:?} is not a valid DNS label")]
    InvalidSlug { site: String, slug: String },

    #[error("site {site:?}: invalid domain name {domain:?}")]
    InvalidDomain { site: String, domain: String },

    #[error("site {site:?}: header name must not be empty")]
    EmptyHeaderName { site: String },

    #[error("site {site:?} branch {branch:?}: redirect path {path:?} must start with '/'")]
    InvalidRedirectPath {
        site: String,
        branch: String,
        path: String,
    },
}

/// Validate a parsed policy, collecting every problem found.
pub fn validate_policy(config: &PolicyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let sites_domain = &config.platform.sites_domain;
    if sites_domain.trim().is_empty() {
        errors.push(ValidationError::EmptySitesDomain);
    } else if !is_hostname(sites_domain) {
        errors.push(ValidationError::InvalidSitesDomain(sites_domain.clone()));
    }

    let mut site_ids = HashSet::new();
    for site in &config.sites {
        if !site_ids.insert(site.id.as_str()) {
            errors.push(ValidationError::DuplicateSite(site.id.clone()));
        }
        validate_site(site, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_site(site: &Site, errors: &mut Vec<ValidationError>) {
    let empty = |field| ValidationError::EmptyField {
        site: site.id.clone(),
        field,
    };
    let invalid_id = |field, id: &str| ValidationError::InvalidId {
        site: site.id.clone(),
        field,
        id: id.to_string(),
    };
    if site.id.is_empty() {
        errors.push(empty("id"));
    } else if !is_path_segment(&site.id) {
        errors.push(invalid_id("id", &site.id));
    }
    if site.name.is_empty() {
        errors.push(empty("name"));
    } else if !is_dns_label(&site.name) {
        errors.push(ValidationError::InvalidSiteName {
            site: site.id.clone(),
            name: site.name.clone(),
        });
    }

    if !site.branches.is_empty() && site.branch(&site.main_branch).is_none() {
        errors.push(ValidationError::UnknownMainBranch {
            site: site.id.clone(),
            branch: site.main_branch.clone(),
        });
    }

    for domain in &site.domains {
        if !is_hostname(&domain.name) {
            errors.push(ValidationError::InvalidDomain {
                site: site.id.clone(),
                domain: domain.name.clone(),
            });
        }
    }

    let mut branch_ids = HashSet::new();
    let mut slugs = HashSet::new();
    for branch in &site.branches {
        if branch.id.is_empty() {
            errors.push(empty("branch id"));
        } else if !is_path_segment(&branch.id) {
            errors.push(invalid_id("branch id", &branch.id));
        } else if !branch_ids.insert(branch.id.as_str()) {
            errors.push(ValidationError::DuplicateBranch {
                site: site.id.clone(),
                branch: branch.id.clone(),
            });
        }
        if !is_dns_label(&branch.slug) {
            errors.push(ValidationError::InvalidSlug {
                site: site.id.clone(),
                slug: branch.slug.clone(),
            });
        } else if !slugs.insert(branch.slug.to_ascii_lowercase()) {
            errors.push(ValidationError::DuplicateSlug {
                site: site.id.clone(),
                slug: branch.slug.clone(),
            });
        }
        validate_branch(site, branch, errors);
    }

    if site.headers.iter().any(|h| h.name.trim().is_empty()) {
        errors.push(ValidationError::EmptyHeaderName {
            site: site.id.clone(),
        });
    }
}

fn validate_branch(site: &Site, branch: &Branch, errors: &mut Vec<ValidationError>) {
    if branch.headers.iter().any(|h| h.name.trim().is_empty()) {
        errors.push(ValidationError::EmptyHeaderName {
            site: site.id.clone(),
        });
    }
    for redirect in &branch.redirects {
        if !redirect.path.starts_with('/') {
            errors.push(ValidationError::InvalidRedirectPath {
                site: site.id.clone(),
                branch: branch.id.clone(),
                path: redirect.path.clone(),
            });
        }
    }
}

/// Usable as one directory name under the content root.
fn is_path_segment(id: &str) -> bool {
    !id.is_empty() && id != "." && !id.contains("..") && !id.contains(['/', '\\'])
}

/// 1-63 chars of ASCII alphanumerics and `-`, not starting or ending with `-`.
fn is_dns_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_hostname(name: &str) -> bool {
    !name.is_empty() && name.len() <= 253 && name.split('.').all(is_dns_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{Header, Redirect, RedirectKind};

    fn branch(id: &str, slug: &str) -> Branch {
        Branch {
            id: id.into(),
            name: String::new(),
            slug: slug.into(),
            password: None,
            redirects: Vec::new(),
            headers: Vec::new(),
        }
    }

    fn site(id: &str, branches: Vec<Branch>) -> Site {
        Site {
            id: id.into(),
            name: "blog".into(),
            main_branch: "b1".into(),
            spa: false,
            password: None,
            domains: Vec::new(),
            headers: Vec::new(),
            branches,
        }
    }

    fn policy(sites: Vec<Site>) -> PolicyConfig {
        PolicyConfig {
            sites,
            ..PolicyConfig::default()
        }
    }

    #[test]
    fn test_valid_policy() {
        let config = policy(vec![site("s1", vec![branch("b1", "prod"), branch("b2", "staging")])]);
        assert!(validate_policy(&config).is_ok());
    }

    #[test]
    fn test_site_without_branches_is_valid() {
        assert!(validate_policy(&policy(vec![site("s1", Vec::new())])).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut bad = site("s1", vec![branch("b2", "Bad_Slug"), branch("b2", "-x")]);
        bad.headers.push(Header::new(" ", "v"));
        let config = policy(vec![bad, site("s1", Vec::new())]);

        let errors = validate_policy(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::UnknownMainBranch {
            site: "s1".into(),
            branch: "b1".into(),
        }));
        assert!(errors.contains(&ValidationError::DuplicateBranch {
            site: "s1".into(),
            branch: "b2".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidSlug {
            site: "s1".into(),
            slug: "Bad_Slug".into(),
        }));
        assert!(errors.contains(&ValidationError::EmptyHeaderName { site: "s1".into() }));
        assert!(errors.contains(&ValidationError::DuplicateSite("s1".into())));
    }

    #[test]
    fn test_duplicate_slug_ignores_case() {
        let config = policy(vec![site("s1", vec![branch("b1", "prod"), branch("b2", "PROD")])]);
        let errors = validate_policy(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateSlug {
                site: "s1".into(),
                slug: "PROD".into(),
            }]
        );
    }

    #[test]
    fn test_redirect_path_must_be_absolute() {
        let mut b1 = branch("b1", "prod");
        b1.redirects.push(Redirect {
            id: "r1".into(),
            path: "old".into(),
            kind: RedirectKind::File { file: "x.html".into() },
        });
        let errors = validate_policy(&policy(vec![site("s1", vec![b1])])).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::InvalidRedirectPath { path, .. }] if path == "old"
        ));
    }

    #[test]
    fn test_hostnames() {
        assert!(is_hostname("blog.example.com"));
        assert!(!is_hostname("blog..example.com"));
        assert!(!is_hostname("-blog.com"));
        assert!(!is_hostname(""));
    }

    #[test]
    fn test_site_name_must_be_dns_label() {
        let mut bad = site("s1", vec![branch("b1", "prod")]);
        bad.name = "My Blog".into();
        assert_eq!(
            validate_policy(&policy(vec![bad])).unwrap_err(),
            vec![ValidationError::InvalidSiteName {
                site: "s1".into(),
                name: "My Blog".into(),
            }]
        );
    }

    #[test]
    fn test_ids_must_be_path_segments() {
        let config = policy(vec![
            site("a/b", vec![branch("b1", "prod")]),
            site("s2", vec![branch("b1", "prod"), branch("..", "dots"), branch("c\\d", "win")]),
        ]);
        let errors = validate_policy(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidId {
                    site: "a/b".into(),
                    field: "id",
                    id: "a/b".into(),
                },
                ValidationError::InvalidId {
                    site: "s2".into(),
                    field: "branch id",
                    id: "..".into(),
                },
                ValidationError::InvalidId {
                    site: "s2".into(),
                    field: "branch id",
                    id: "c\\d".into(),
                },
            ]
        );
    }

    #[test]
    fn test_sites_domain_must_be_hostname() {
        let mut config = policy(Vec::new());
        config.platform.sites_domain = "sites example".into();
        assert_eq!(
            validate_policy(&config).unwrap_err(),
            vec![ValidationError::InvalidSitesDomain("sites example".into())]
        );
    }

    #[test]
    fn test_empty_sites_domain() {
        let mut config = policy(Vec::new());
        config.platform.sites_domain = String::new();
        assert_eq!(
            validate_policy(&config).unwrap_err(),
            vec![ValidationError::EmptySitesDomain]
        );
    }
}
