//! Content route: serve a branch's files.
//!
//! # Handler chain
//! ```text
//! [rewrite (spa only)] → headers → encode (gzip) → file_server
//! ```
//!
//! With `spa` set the route only matches when the requested path or
//! `/index.html` exists under the content root, and the rewrite points the
//! file server at whichever one matched.

use std::collections::BTreeMap;

use crate::routing::collaborators::RouteCollaborators;
use crate::routing::error::CompileResult;
use crate::routing::route::{
    Encodings, FileMatcher, GzipSettings, Handler, HeaderOps, MatcherSet, Route,
};
use crate::site::{Branch, Site};

pub const CACHE_CONTROL: &str = "Cache-Control";

/// Directives forced on every content response.
pub const CACHE_CONTROL_DIRECTIVES: [&str; 3] = ["public", "max-age=0", "must-revalidate"];

pub const SPA_ENTRY: &str = "/index.html";

/// Route serving `branch` content.
pub fn content_route(
    site: &Site,
    branch: &Branch,
    collaborators: &dyn RouteCollaborators,
) -> CompileResult<Route> {
    let root = collaborators.branch_dir(&site.id, &branch.id)?;

    let mut handle = Vec::with_capacity(4);
    let mut matchers = Vec::new();
    if site.spa {
        matchers.push(MatcherSet::file(FileMatcher {
            root: root.clone(),
            try_files: vec!["{http.request.uri.path}".to_string(), SPA_ENTRY.to_string()],
        }));
        handle.push(Handler::Rewrite {
            uri: "{http.matchers.file.relative}".to_string(),
        });
    }
    handle.push(headers_handler(site, branch));
    handle.push(gzip_handler());
    handle.push(Handler::FileServer { root });

    tracing::debug!(
        site = %site.id,
        branch = %branch.id,
        spa = site.spa,
        handlers = handle.len(),
        "Built content route"
    );

    Ok(Route {
        matchers,
        handle,
        ..Route::default()
    })
}

/// Site headers overlaid with branch headers, `Cache-Control` always forced.
///
/// Values are set verbatim as a single element; comma-separated values are
/// not split into multiple entries.
pub fn headers_handler(site: &Site, branch: &Branch) -> Handler {
    let mut set = BTreeMap::new();
    for header in site.headers.iter().chain(&branch.headers) {
        if header.name.eq_ignore_ascii_case(CACHE_CONTROL) {
            continue;
        }
        // Header names are case-insensitive; a later header replaces the
        // earlier key whatever its spelling.
        set.retain(|name: &String, _| !name.eq_ignore_ascii_case(&header.name));
        set.insert(header.name.clone(), vec![header.value.clone()]);
    }
    set.insert(
        CACHE_CONTROL.to_string(),
        CACHE_CONTROL_DIRECTIVES.iter().map(|d| d.to_string()).collect(),
    );

    Handler::Headers {
        response: HeaderOps { set },
    }
}

fn gzip_handler() -> Handler {
    Handler::Encode {
        encodings: Encodings {
            gzip: Some(GzipSettings::default()),
        },
    }
}
