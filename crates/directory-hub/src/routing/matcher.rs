//! Host and path matching for the two addressing modes. Both
//! procedures are pure functions over a catalog snapshot: no I/O, no
//! cache access, linear in the number of directories.

use crate::catalog::Directory;
use crate::routing::slug::normalize_slug;

/// Ephemeral result of a successful match; never persisted.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub directory: &'a Directory,
    /// Trailing path owned by the directory's own page routing. Empty
    /// for a subdirectory hit on the directory root; the full inbound
    /// path for subdomain hits (the host carries the identity there).
    pub subpath: String,
}

/// Finds the directory owning `hostname` under subdomain addressing.
/// The hostname must be a label under `root_domain`, never the bare
/// root; the label immediately preceding the root suffix is compared,
/// normalized, against each directory's normalized `subdomain`.
pub fn match_subdomain_request<'a>(
    directories: &'a [Directory],
    hostname: &str,
    root_domain: &str,
    path: &str,
) -> Option<RouteMatch<'a>> {
    let label = subdomain_label(hostname, root_domain)?;
    let wanted = normalize_slug(&label, "");
    if wanted.is_empty() {
        return None;
    }

    directories
        .iter()
        .find(|directory| {
            directory
                .subdomain
                .as_deref()
                .map(|subdomain| normalize_slug(subdomain, "") == wanted)
                .unwrap_or(false)
        })
        .map(|directory| RouteMatch {
            directory,
            subpath: path.to_string(),
        })
}

/// Extracts the host label immediately preceding `.root_domain`.
/// Returns `None` for the bare root, hosts outside the root, or an
/// empty root. A port suffix and a trailing dot are ignored.
pub(crate) fn subdomain_label(hostname: &str, root_domain: &str) -> Option<String> {
    let host = hostname
        .trim()
        .split(':')
        .next()
        .unwrap_or_default()
        .trim_end_matches('.')
        .to_ascii_lowercase();
    let root = root_domain.trim().trim_matches('.').to_ascii_lowercase();

    if root.is_empty() || host == root {
        return None;
    }

    let prefix = host.strip_suffix(&format!(".{root}"))?;
    let label = prefix.rsplit('.').next().filter(|label| !label.is_empty())?;
    Some(label.to_string())
}

/// Finds the directory owning `path` under subdirectory addressing.
/// The path must equal `base` (case-insensitively) or live under it;
/// the remaining segments are compared normalized against each
/// directory's normalized `subdirectory` segments. Subdirectories may
/// be multi-segment ("nyc/plumbers"); the most specific match wins.
pub fn match_subdirectory_request<'a>(
    directories: &'a [Directory],
    base: &str,
    path: &str,
) -> Option<RouteMatch<'a>> {
    let rest = path_under_base(base, path)?;
    let request_segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    if request_segments.is_empty() {
        return None;
    }
    let normalized_request: Vec<String> = request_segments
        .iter()
        .map(|segment| normalize_slug(segment, ""))
        .collect();

    let mut best: Option<(usize, &Directory)> = None;
    for directory in directories {
        let Some(subdirectory) = directory.subdirectory.as_deref() else {
            continue;
        };
        let directory_segments = subdirectory_segments(subdirectory);
        if directory_segments.is_empty() || directory_segments.len() > normalized_request.len() {
            continue;
        }
        let is_prefix = directory_segments
            .iter()
            .zip(&normalized_request)
            .all(|(own, requested)| own == requested);
        if !is_prefix {
            continue;
        }
        if best.map_or(true, |(depth, _)| directory_segments.len() > depth) {
            best = Some((directory_segments.len(), directory));
        }
    }

    best.map(|(depth, directory)| {
        let remainder = request_segments[depth..].join("/");
        let subpath = if remainder.is_empty() {
            String::new()
        } else {
            format!("/{remainder}")
        };
        RouteMatch { directory, subpath }
    })
}

pub(crate) fn subdirectory_segments(subdirectory: &str) -> Vec<String> {
    subdirectory
        .split('/')
        .map(|segment| normalize_slug(segment, ""))
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Strips the configured base prefix, case-insensitively. `Some("")`
/// means the path hit the base exactly; `None` means the path lives
/// outside subdirectory addressing altogether.
fn path_under_base(base: &str, path: &str) -> Option<String> {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return Some(path.to_string());
    }

    let path_lower = path.to_ascii_lowercase();
    let base_lower = base.to_ascii_lowercase();
    if path_lower == base_lower {
        return Some(String::new());
    }
    if path_lower.starts_with(&format!("{base_lower}/")) {
        // ASCII lowercasing preserves byte offsets
        return Some(path[base.len()..].to_string());
    }
    None
}
