use crate::routing::slug::{humanize_slug, normalize_slug};
use serde::{Deserialize, Serialize};

/// Promotional ranking levels a curator may assign. Standard tier is
/// never curated; it is the unranked remainder after segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturedTier {
    Hero,
    Premium,
}

impl FeaturedTier {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Hero => 0,
            Self::Premium => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Premium => "Premium",
        }
    }

    /// Default display label for placements the curator left unlabeled
    /// and for score-ranked fallback placements.
    pub const fn default_slot_label(self) -> &'static str {
        match self {
            Self::Hero => "Top pick",
            Self::Premium => "Tier-two highlight",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hero" => Some(Self::Hero),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

/// Authoring tools emit references either as a bare slug string or as
/// a `{slug, name, description}` object. The union is resolved here,
/// once, at the boundary; downstream code only ever sees the
/// normalized slug and display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryRef {
    Slug(String),
    Descriptor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl EntryRef {
    /// Canonical slug for identity comparisons, or `None` when the
    /// reference carries nothing normalizable.
    pub fn normalized_slug(&self) -> Option<String> {
        let raw = match self {
            Self::Slug(slug) => Some(slug.as_str()),
            Self::Descriptor { slug, name, .. } => slug
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .or(name.as_deref()),
        }?;

        let normalized = normalize_slug(raw, "");
        (!normalized.is_empty()).then_some(normalized)
    }

    /// Explicit display name, when the authoring side provided one.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Slug(_) => None,
            Self::Descriptor { name, .. } => {
                name.as_deref().map(str::trim).filter(|n| !n.is_empty())
            }
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Slug(_) => None,
            Self::Descriptor { description, .. } => description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty()),
        }
    }
}

/// Category or location identity attached to a directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyRef {
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A business entry attached to a directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<EntryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Listing {
    /// Slug used for featuring, derived from the name when no explicit
    /// slug exists. A listing with neither can never be targeted by a
    /// curated slot and is only ever placed via fallback ranking.
    pub fn normalized_slug(&self) -> Option<String> {
        let raw = self
            .slug
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .or(self.name.as_deref())?;

        let normalized = normalize_slug(raw, "");
        (!normalized.is_empty()).then_some(normalized)
    }

    /// Score used for ranking. Missing or non-finite scores sort last.
    pub fn ranking_score(&self) -> f64 {
        self.score
            .filter(|score| score.is_finite())
            .unwrap_or(f64::NEG_INFINITY)
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.normalized_slug()
            .map(|slug| humanize_slug(&slug))
            .unwrap_or_default()
    }
}

/// A curated promotional assignment exactly as authored. Validation
/// happens in the segmenter; malformed slots are editorial noise and
/// are discarded silently rather than surfaced as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<EntryRef>,
}

/// A published category × location page, addressable by subdomain or
/// subdirectory. `slug`, `subdomain`, and `subdirectory` are each
/// unique across the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdirectory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaxonomyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TaxonomyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub featured_slots: Vec<FeaturedSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listings: Vec<Listing>,
}

impl Directory {
    pub fn normalized_slug(&self) -> String {
        normalize_slug(&self.slug, "")
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        humanize_slug(&self.normalized_slug())
    }
}

/// Lookup by normalized slug, for page rendering once routing has
/// already happened.
pub fn find_directory_by_slug<'a>(
    directories: &'a [Directory],
    slug: &str,
) -> Option<&'a Directory> {
    let wanted = normalize_slug(slug, "");
    if wanted.is_empty() {
        return None;
    }
    directories
        .iter()
        .find(|directory| directory.normalized_slug() == wanted)
}
