//! Canonical path-segment normalization. Slugs are the identity
//! currency of the whole engine: every host label, subdirectory
//! segment, and curated-slot reference is compared only after passing
//! through `normalize_slug`.

/// Lower-cases `input`, collapses every run of non-`[a-z0-9]`
/// characters into a single hyphen, and trims leading/trailing
/// hyphens. Returns `fallback` when nothing survives. Total and
/// idempotent: `normalize_slug(normalize_slug(x, f), f)` equals
/// `normalize_slug(x, f)` for any `x`.
pub fn normalize_slug(input: &str, fallback: &str) -> String {
    let mut normalized = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            if pending_hyphen && !normalized.is_empty() {
                normalized.push('-');
            }
            pending_hyphen = false;
            normalized.push(lower);
        } else {
            pending_hyphen = true;
        }
    }

    if normalized.is_empty() {
        fallback.to_string()
    } else {
        normalized
    }
}

/// Title-cases each hyphen-separated segment and rejoins with spaces.
/// Display fallback only; never use the result for identity checks.
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims_hyphens() {
        assert_eq!(normalize_slug("  NYC -- Plumbers! ", "x"), "nyc-plumbers");
        assert_eq!(normalize_slug("nyc/plumbers", "x"), "nyc-plumbers");
        assert_eq!(normalize_slug("__24_7_Locksmiths__", "x"), "24-7-locksmiths");
    }

    #[test]
    fn falls_back_when_nothing_survives() {
        assert_eq!(normalize_slug("", "fallback"), "fallback");
        assert_eq!(normalize_slug("!!--??", "fallback"), "fallback");
        assert_eq!(normalize_slug("ééé", "fallback"), "fallback");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["Café Crème", "a--b--c", "-x-", "Plumbers & Heating, NYC"] {
            let once = normalize_slug(input, "fallback");
            assert_eq!(normalize_slug(&once, "fallback"), once);
        }
    }

    #[test]
    fn humanizes_for_display() {
        assert_eq!(humanize_slug("nyc-plumbers"), "Nyc Plumbers");
        assert_eq!(humanize_slug("emergency--repair"), "Emergency Repair");
        assert_eq!(humanize_slug(""), "");
    }
}
