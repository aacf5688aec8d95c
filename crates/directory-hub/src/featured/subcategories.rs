//! Subcategory faceting: counts per subcategory across a directory's
//! listings, plus the active-filter navigation strip rendered above
//! listing grids.

use crate::catalog::Directory;
use crate::routing::slug::{humanize_slug, normalize_slug};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryFacet {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub listing_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryNavItem {
    /// `None` for the "All subcategories" entry.
    pub slug: Option<String>,
    pub name: String,
    pub listing_count: usize,
    pub active: bool,
}

/// Facet counts for every subcategory with at least one listing,
/// sorted by count descending then name ascending (case-insensitive).
/// A listing counts once per subcategory no matter how often it
/// repeats the reference.
pub fn build_directory_subcategories(directory: &Directory) -> Vec<SubcategoryFacet> {
    let mut facets: HashMap<String, SubcategoryFacet> = HashMap::new();

    for listing in &directory.listings {
        let mut counted: HashSet<String> = HashSet::new();
        for subcategory in &listing.subcategories {
            let Some(slug) = subcategory.normalized_slug() else {
                continue;
            };
            if !counted.insert(slug.clone()) {
                continue;
            }
            let facet = facets.entry(slug.clone()).or_insert_with(|| SubcategoryFacet {
                name: subcategory
                    .display_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| humanize_slug(&slug)),
                slug,
                description: None,
                listing_count: 0,
            });
            facet.listing_count += 1;
            if facet.description.is_none() {
                facet.description = subcategory.description().map(str::to_string);
            }
        }
    }

    let mut sorted: Vec<SubcategoryFacet> = facets
        .into_values()
        .filter(|facet| facet.listing_count > 0)
        .collect();
    sorted.sort_by(|a, b| {
        b.listing_count
            .cmp(&a.listing_count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    sorted
}

/// Filter navigation: an "All subcategories" entry covering the full
/// listing count, followed by the facets, with the entry matching
/// `active_slug` (normalized) flagged active. "All" is active when
/// nothing matches. Empty when the directory has no category or
/// location identity, or no listings.
pub fn build_subcategory_filter_nav(
    directory: &Directory,
    active_slug: Option<&str>,
) -> Vec<SubcategoryNavItem> {
    if directory.category.is_none() && directory.location.is_none() {
        return Vec::new();
    }
    if directory.listings.is_empty() {
        return Vec::new();
    }

    let wanted = active_slug
        .map(|slug| normalize_slug(slug, ""))
        .filter(|slug| !slug.is_empty());

    let mut any_active = false;
    let mut items: Vec<SubcategoryNavItem> = build_directory_subcategories(directory)
        .into_iter()
        .map(|facet| {
            let active = wanted.as_deref() == Some(facet.slug.as_str());
            any_active |= active;
            SubcategoryNavItem {
                slug: Some(facet.slug),
                name: facet.name,
                listing_count: facet.listing_count,
                active,
            }
        })
        .collect();

    items.insert(
        0,
        SubcategoryNavItem {
            slug: None,
            name: "All subcategories".to_string(),
            listing_count: directory.listings.len(),
            active: !any_active,
        },
    );
    items
}
