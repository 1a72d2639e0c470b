//! Site, branch and domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tenant owning one or more branches and shared routing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Stable site identity. Also used as the route group.
    pub id: String,

    /// Human-facing name; the platform main domain is derived from it.
    pub name: String,

    /// Id of the branch served at the site's bare hostnames.
    pub main_branch: String,

    /// Serve `/index.html` for paths that do not resolve to a file.
    #[serde(default)]
    pub spa: bool,

    /// Site-wide password, applied to every branch without its own.
    #[serde(default)]
    pub password: Option<Password>,

    /// Custom domains, in priority order.
    #[serde(default)]
    pub domains: Vec<SiteDomain>,

    /// Response headers applied to every branch.
    #[serde(default)]
    pub headers: Vec<Header>,

    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Site {
    /// Returns true if `branch` is this site's main branch.
    pub fn is_main_branch(&self, branch: &Branch) -> bool {
        branch.id == self.main_branch
    }

    /// Branch password if set, otherwise the site password.
    pub fn effective_password<'a>(&'a self, branch: &'a Branch) -> Option<&'a Password> {
        branch.password.as_ref().or(self.password.as_ref())
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }
}

/// A deployable content variant of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// DNS label used to build `<slug>.<domain>` hostnames.
    pub slug: String,

    /// Overrides the site password for this branch.
    #[serde(default)]
    pub password: Option<Password>,

    /// Redirect rules, evaluated in declared order.
    #[serde(default)]
    pub redirects: Vec<Redirect>,

    /// Response headers; win over site headers on name collision.
    #[serde(default)]
    pub headers: Vec<Header>,
}

/// A hostname associated with a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDomain {
    pub name: String,

    /// Derive `<branch-slug>.<name>` hostnames from this domain.
    #[serde(default)]
    pub expose_branches: bool,

    #[serde(default)]
    pub ssl: SslConfiguration,
}

impl SiteDomain {
    /// Domain entry for the platform-managed hostname of a site.
    pub fn platform(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expose_branches: true,
            ssl: SslConfiguration::Acme,
        }
    }

    /// Dedup key: domains are the same when their names match, ignoring case.
    pub fn same_host(&self, other: &SiteDomain) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

/// How TLS certificates are provided for a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SslConfiguration {
    /// Certificates issued and renewed automatically.
    #[default]
    Acme,
    /// Operator-supplied certificate and key (PEM paths or references).
    Custom { certificate: String, key: String },
}

/// One response header to set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A redirect rule on a branch, matched on an exact request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    #[serde(default)]
    pub id: String,

    /// Request path that triggers the redirect (must start with `/`).
    pub path: String,

    #[serde(flatten)]
    pub kind: RedirectKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RedirectKind {
    /// Answer with an HTTP redirect to `to`.
    Url {
        to: String,
        #[serde(default)]
        permanent: bool,
    },
    /// Serve a file stored in the branch content root.
    File { file: String },
}

/// A bcrypt password hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn hash(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
