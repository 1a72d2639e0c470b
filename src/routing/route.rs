//! Output route schema.
//!
//! Passive types mirroring the target server's JSON schema for HTTP routes,
//! matchers and handlers. Nothing here evaluates requests; the server does.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A match predicate, an ordered handler chain and optional error routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Stable identifier addressable through the server's config API.
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Only the first matching route within a group is executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Matcher sets, OR-ed together. Empty means "always matches".
    #[serde(rename = "match", default, skip_serializing_if = "Vec::is_empty")]
    pub matchers: Vec<MatcherSet>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handle: Vec<Handler>,

    /// Routes evaluated when a handler in this route returns an error status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorRoutes>,
}

impl Route {
    pub fn new(handle: Vec<Handler>) -> Self {
        Self {
            handle,
            ..Self::default()
        }
    }

    pub fn with_match(mut self, matcher: MatcherSet) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Host list of the first matcher set, if any.
    pub fn hosts(&self) -> Option<&[String]> {
        self.matchers.first().and_then(|m| m.host.as_deref())
    }

    /// Routes of the leading subroute handler, if any.
    pub fn subroutes(&self) -> Option<&[Route]> {
        self.handle.iter().find_map(|h| match h {
            Handler::Subroute { routes } => Some(routes.as_slice()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorRoutes {
    pub routes: Vec<Route>,
}

/// Conditions AND-ed together within one set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherSet {
    /// Serialised even when empty: an empty host list matches no request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileMatcher>,

    /// Placeholder expression, e.g. `{http.error.status_code} == 401`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl MatcherSet {
    pub fn host(hosts: Vec<String>) -> Self {
        Self {
            host: Some(hosts),
            ..Self::default()
        }
    }

    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(vec![path.into()]),
            ..Self::default()
        }
    }

    pub fn file(file: FileMatcher) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    pub fn expression(expression: impl Into<String>) -> Self {
        Self {
            expression: Some(expression.into()),
            ..Self::default()
        }
    }
}

/// Matches when one of `try_files` exists under `root`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMatcher {
    pub root: String,
    pub try_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "handler", rename_all = "snake_case")]
pub enum Handler {
    Subroute {
        routes: Vec<Route>,
    },
    Rewrite {
        uri: String,
    },
    Headers {
        response: HeaderOps,
    },
    Encode {
        encodings: Encodings,
    },
    FileServer {
        root: String,
    },
    StaticResponse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status_code: Option<StatusCode>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
    Authentication {
        providers: AuthProviders,
    },
}

impl Handler {
    /// The `handler` tag this variant serialises with.
    pub fn name(&self) -> &'static str {
        match self {
            Handler::Subroute { .. } => "subroute",
            Handler::Rewrite { .. } => "rewrite",
            Handler::Headers { .. } => "headers",
            Handler::Encode { .. } => "encode",
            Handler::FileServer { .. } => "file_server",
            Handler::StaticResponse { .. } => "static_response",
            Handler::Authentication { .. } => "authentication",
        }
    }
}

/// Response header operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderOps {
    /// Headers to set, replacing existing values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encodings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gzip: Option<GzipSettings>,
}

/// Server defaults apply when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GzipSettings {}

/// Either a literal status or a placeholder resolved at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    Code(u16),
    Placeholder(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProviders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_basic: Option<HttpBasicAuth>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpBasicAuth {
    pub hash: HashConfig,
    pub accounts: Vec<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    pub algorithm: String,
}

/// A basic-auth account; `password` is the base64-encoded hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_json_shape() {
        let route = Route {
            id: Some("branch-s1-b1".into()),
            group: Some("s1".into()),
            matchers: vec![MatcherSet::host(vec!["prod.blog.sites.test".into()])],
            handle: vec![Handler::FileServer {
                root: "/sites/s1/b1".into(),
            }],
            errors: None,
        };

        assert_eq!(
            serde_json::to_value(&route).unwrap(),
            json!({
                "@id": "branch-s1-b1",
                "group": "s1",
                "match": [{ "host": ["prod.blog.sites.test"] }],
                "handle": [{ "handler": "file_server", "root": "/sites/s1/b1" }],
            })
        );
    }

    #[test]
    fn test_empty_host_list_is_kept() {
        let matcher = MatcherSet::host(Vec::new());
        assert_eq!(serde_json::to_value(&matcher).unwrap(), json!({ "host": [] }));
    }

    #[test]
    fn test_status_code_variants() {
        let placeholder = Handler::StaticResponse {
            status_code: Some(StatusCode::Placeholder("{http.error.status_code}".into())),
            headers: BTreeMap::new(),
            body: Some("not authenticated".into()),
        };
        assert_eq!(
            serde_json::to_value(&placeholder).unwrap(),
            json!({
                "handler": "static_response",
                "status_code": "{http.error.status_code}",
                "body": "not authenticated",
            })
        );

        let code: StatusCode = serde_json::from_value(json!(302)).unwrap();
        assert_eq!(code, StatusCode::Code(302));
    }

    #[test]
    fn test_gzip_encodes_as_empty_object() {
        let encode = Handler::Encode {
            encodings: Encodings {
                gzip: Some(GzipSettings::default()),
            },
        };
        assert_eq!(
            serde_json::to_value(&encode).unwrap(),
            json!({ "handler": "encode", "encodings": { "gzip": {} } })
        );
        assert_eq!(encode.name(), "encode");
    }
}
