//! Response target resolution: given an inbound host and path, decide
//! whether to serve untouched, rewrite internally to the directory's
//! content route, or redirect to the canonical address. A pure
//! decision function over the catalog snapshot and the static routing
//! configuration; it never performs I/O or touches the cache.

use crate::catalog::Directory;
use crate::config::{AddressingMode, RoutingConfig};
use crate::routing::matcher::{
    match_subdirectory_request, match_subdomain_request, subdirectory_segments, RouteMatch,
};
use crate::routing::slug::normalize_slug;

/// HTTP status for every externally visible redirect. Permanent and
/// method-preserving, so crawlers consolidate on the canonical URL.
pub const REDIRECT_STATUS: u16 = 308;

/// Outcome of routing one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Asset request, unknown host/path, or unresolvable canonical
    /// target: fall through to ordinary (non-directory) handling.
    PassThrough,
    /// Serve the directory's content at the original URL.
    Rewrite { path: String },
    /// 308 to the canonical address; the query string travels along.
    Redirect { location: String },
}

/// Resolves an inbound request against the catalog snapshot. `query`
/// is the raw query string without the leading `?`, preserved
/// verbatim on every redirect. Fragments never reach the server and
/// are therefore dropped by construction.
pub fn resolve_request(
    directories: &[Directory],
    config: &RoutingConfig,
    hostname: &str,
    path: &str,
    query: Option<&str>,
) -> Disposition {
    if is_asset_path(path) {
        return Disposition::PassThrough;
    }

    if let Some(matched) =
        match_subdomain_request(directories, hostname, &config.subdomain_root, path)
    {
        return dispose(config, AddressingMode::Subdomain, &matched, path, query);
    }

    if let Some(matched) =
        match_subdirectory_request(directories, &config.subdirectory_base, path)
    {
        return dispose(config, AddressingMode::Subdirectory, &matched, path, query);
    }

    Disposition::PassThrough
}

fn dispose(
    config: &RoutingConfig,
    arrival: AddressingMode,
    matched: &RouteMatch<'_>,
    raw_path: &str,
    query: Option<&str>,
) -> Disposition {
    if arrival != config.primary_mode {
        // Alias access: consolidate on the primary mode's address.
        return match canonical_url(config, matched.directory, &matched.subpath) {
            Some(location) => Disposition::Redirect {
                location: append_query(location, query),
            },
            None => Disposition::PassThrough,
        };
    }

    // Canonical mode, possibly non-canonical spelling. Trailing and
    // duplicate slashes redirect once; everything else serves in place.
    let cleaned = clean_path(raw_path);
    if cleaned != raw_path {
        return Disposition::Redirect {
            location: append_query(cleaned, query),
        };
    }

    match rewrite_path(matched.directory, arrival, &matched.subpath) {
        Some(path) => Disposition::Rewrite { path },
        None => Disposition::PassThrough,
    }
}

/// Canonical absolute URL under the primary addressing mode, or
/// `None` when the directory lacks the identity value that mode
/// needs (treated as no-match by the caller).
pub fn canonical_url(
    config: &RoutingConfig,
    directory: &Directory,
    subpath: &str,
) -> Option<String> {
    let protocol = &config.public_protocol;
    let root = &config.subdomain_root;
    match config.primary_mode {
        AddressingMode::Subdirectory => {
            let path = canonical_directory_path(directory, subpath)?;
            Some(format!("{protocol}://{root}{path}"))
        }
        AddressingMode::Subdomain => {
            let label = normalize_slug(directory.subdomain.as_deref()?, "");
            if label.is_empty() {
                return None;
            }
            Some(format!("{protocol}://{label}.{root}{}", clean_path(subpath)))
        }
    }
}

/// Internal content route: the directory's normalized subdirectory
/// plus the request's trailing subpath.
pub fn canonical_directory_path(directory: &Directory, subpath: &str) -> Option<String> {
    let segments = subdirectory_segments(directory.subdirectory.as_deref()?);
    if segments.is_empty() {
        return None;
    }
    let mut path = format!("/{}", segments.join("/"));
    let trailing = clean_path(subpath);
    if trailing != "/" {
        path.push_str(&trailing);
    }
    Some(path)
}

fn rewrite_path(
    directory: &Directory,
    arrival: AddressingMode,
    subpath: &str,
) -> Option<String> {
    match arrival {
        // Host carries the identity; the content route is the subpath.
        AddressingMode::Subdomain => Some(clean_path(subpath)),
        AddressingMode::Subdirectory => canonical_directory_path(directory, subpath),
    }
}

/// Collapses duplicate slashes and strips any trailing slash, keeping
/// `/` itself intact. The canonical spelling of every served path.
pub fn clean_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Asset-like requests (a final segment with a dotted extension of
/// two or more alphanumerics) bypass directory routing entirely.
pub fn is_asset_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or("");
    match segment.rsplit_once('.') {
        Some((_, extension)) => {
            extension.len() >= 2 && extension.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

fn append_query(target: String, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{target}?{query}"),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_asset_paths() {
        assert!(is_asset_path("/logo.png"));
        assert!(is_asset_path("/assets/app.min.js"));
        assert!(is_asset_path("/favicon.ico?v=2"));
        assert!(!is_asset_path("/nyc/plumbers"));
        assert!(!is_asset_path("/ver1.2/")); // extension belongs to a non-final segment
        assert!(!is_asset_path("/file.x")); // single-character extension
    }

    #[test]
    fn cleans_path_spelling() {
        assert_eq!(clean_path("/nyc//plumbers/"), "/nyc/plumbers");
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path(""), "/");
        assert_eq!(clean_path("///"), "/");
    }

    #[test]
    fn query_is_appended_only_when_present() {
        assert_eq!(append_query("/a".to_string(), Some("q=1")), "/a?q=1");
        assert_eq!(append_query("/a".to_string(), Some("")), "/a");
        assert_eq!(append_query("/a".to_string(), None), "/a");
    }

    #[test]
    fn canonical_directory_path_normalizes_segments() {
        let directory = Directory {
            slug: "nyc-plumbers".to_string(),
            subdirectory: Some("NYC/Plumbers".to_string()),
            ..Directory::default()
        };
        assert_eq!(
            canonical_directory_path(&directory, "/reviews/"),
            Some("/nyc/plumbers/reviews".to_string())
        );
        assert_eq!(
            canonical_directory_path(&directory, ""),
            Some("/nyc/plumbers".to_string())
        );

        let missing = Directory::default();
        assert_eq!(canonical_directory_path(&missing, "/x"), None);
    }
}
