//! Featured-listing segmentation: curated hero/premium slots overlaid
//! on a score-ranked fallback. Curation is best-effort editorial data,
//! so malformed or unresolvable slots are dropped silently and the
//! function never fails.

use crate::catalog::{Directory, FeaturedSlot, FeaturedTier, Listing};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_FEATURED_LIMIT: i64 = 3;

/// One listing promoted into a display tier, either by a curated slot
/// or by score-ranked fallback.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedPlacement {
    pub tier: FeaturedTier,
    pub position: i64,
    pub label: String,
    pub listing: Listing,
}

/// Display-ready segmentation of a directory's listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeaturedSegments {
    pub hero: Option<FeaturedPlacement>,
    pub tier_two: Vec<FeaturedPlacement>,
    /// Standard tier: everything not consumed above, in score order.
    pub remaining_listings: Vec<Listing>,
}

/// A curated slot that survived validation: recognized tier plus a
/// reference resolving to a listing actually present in the directory.
#[derive(Debug)]
struct ResolvedSlot {
    tier: FeaturedTier,
    position: i64,
    label: Option<String>,
    slug: String,
}

fn resolve_slot(slot: &FeaturedSlot, lookup: &HashMap<String, usize>) -> Option<ResolvedSlot> {
    let tier = FeaturedTier::parse(slot.tier.as_deref()?)?;
    let slug = slot.listing.as_ref()?.normalized_slug()?;
    if !lookup.contains_key(&slug) {
        return None;
    }
    Some(ResolvedSlot {
        tier,
        position: slot.position.filter(|p| *p > 0).unwrap_or(1),
        label: slot
            .label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string),
        slug,
    })
}

pub fn segment_featured_listings(directory: &Directory) -> FeaturedSegments {
    // Stable descending score sort keeps the authored order among
    // ties, which makes every downstream pick deterministic.
    let mut ranked: Vec<&Listing> = directory.listings.iter().collect();
    ranked.sort_by(|a, b| b.ranking_score().total_cmp(&a.ranking_score()));

    let featured_limit = directory.featured_limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    if featured_limit <= 0 {
        return FeaturedSegments {
            hero: None,
            tier_two: Vec::new(),
            remaining_listings: ranked.into_iter().cloned().collect(),
        };
    }

    // Lookup by normalized slug; the first (highest-ranked) occurrence
    // wins when duplicates collapse to the same slug.
    let mut lookup: HashMap<String, usize> = HashMap::new();
    for (index, listing) in ranked.iter().enumerate() {
        if let Some(slug) = listing.normalized_slug() {
            lookup.entry(slug).or_insert(index);
        }
    }

    // Validate, de-duplicate by slug (earlier authored slot wins),
    // then order candidates by tier rank and position.
    let mut candidates: Vec<ResolvedSlot> = directory
        .featured_slots
        .iter()
        .filter_map(|slot| resolve_slot(slot, &lookup))
        .collect();
    let mut seen_slugs = HashSet::new();
    candidates.retain(|candidate| seen_slugs.insert(candidate.slug.clone()));
    candidates.sort_by_key(|candidate| (candidate.tier.rank(), candidate.position));

    let mut used = vec![false; ranked.len()];

    let hero = pick_hero(&candidates, &lookup, &ranked, &mut used);

    let mut tier_two = Vec::new();
    let capacity = (featured_limit - i64::from(hero.is_some())).max(0);

    for candidate in candidates
        .iter()
        .filter(|candidate| candidate.tier == FeaturedTier::Premium)
    {
        if (tier_two.len() as i64) >= capacity {
            break;
        }
        let index = lookup[&candidate.slug];
        if used[index] {
            continue;
        }
        used[index] = true;
        tier_two.push(FeaturedPlacement {
            tier: FeaturedTier::Premium,
            position: candidate.position,
            label: candidate
                .label
                .clone()
                .unwrap_or_else(|| FeaturedTier::Premium.default_slot_label().to_string()),
            listing: ranked[index].clone(),
        });
    }

    // Fallback fills only an entirely uncurated second tier. Curated
    // premium slots that partially fill the capacity leave the rest
    // unused, so manual curation is never silently diluted.
    if tier_two.is_empty() && capacity > 0 {
        let mut position = 1;
        for index in 0..ranked.len() {
            if (tier_two.len() as i64) >= capacity {
                break;
            }
            if used[index] {
                continue;
            }
            used[index] = true;
            tier_two.push(FeaturedPlacement {
                tier: FeaturedTier::Premium,
                position,
                label: FeaturedTier::Premium.default_slot_label().to_string(),
                listing: ranked[index].clone(),
            });
            position += 1;
        }
    }

    let remaining_listings = ranked
        .iter()
        .enumerate()
        .filter(|(index, _)| !used[*index])
        .map(|(_, listing)| (*listing).clone())
        .collect();

    FeaturedSegments {
        hero,
        tier_two,
        remaining_listings,
    }
}

fn pick_hero(
    candidates: &[ResolvedSlot],
    lookup: &HashMap<String, usize>,
    ranked: &[&Listing],
    used: &mut [bool],
) -> Option<FeaturedPlacement> {
    if let Some(candidate) = candidates
        .iter()
        .find(|candidate| candidate.tier == FeaturedTier::Hero)
    {
        let index = lookup[&candidate.slug];
        used[index] = true;
        return Some(FeaturedPlacement {
            tier: FeaturedTier::Hero,
            position: candidate.position,
            label: candidate
                .label
                .clone()
                .unwrap_or_else(|| FeaturedTier::Hero.default_slot_label().to_string()),
            listing: ranked[index].clone(),
        });
    }

    // No curated hero: promote the highest-scoring unused listing.
    let index = (0..ranked.len()).find(|index| !used[*index])?;
    used[index] = true;
    Some(FeaturedPlacement {
        tier: FeaturedTier::Hero,
        position: 1,
        label: FeaturedTier::Hero.default_slot_label().to_string(),
        listing: ranked[index].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntryRef;

    fn listing(slug: &str, score: f64) -> Listing {
        Listing {
            slug: Some(slug.to_string()),
            score: Some(score),
            ..Listing::default()
        }
    }

    fn slot(tier: &str, listing: &str) -> FeaturedSlot {
        FeaturedSlot {
            tier: Some(tier.to_string()),
            listing: Some(EntryRef::Slug(listing.to_string())),
            ..FeaturedSlot::default()
        }
    }

    fn slugs(listings: &[Listing]) -> Vec<String> {
        listings
            .iter()
            .map(|l| l.normalized_slug().unwrap_or_default())
            .collect()
    }

    #[test]
    fn uncurated_directory_falls_back_to_score_order() {
        let directory = Directory {
            listings: vec![listing("a", 9.0), listing("b", 7.0), listing("c", 5.0)],
            featured_limit: Some(2),
            ..Directory::default()
        };

        let segments = segment_featured_listings(&directory);
        let hero = segments.hero.expect("hero promoted from scores");
        assert_eq!(hero.tier, FeaturedTier::Hero);
        assert_eq!(hero.label, "Top pick");
        assert_eq!(hero.listing.slug.as_deref(), Some("a"));
        assert_eq!(segments.tier_two.len(), 1);
        assert_eq!(segments.tier_two[0].listing.slug.as_deref(), Some("b"));
        assert_eq!(slugs(&segments.remaining_listings), vec!["c"]);
    }

    #[test]
    fn curated_hero_overrides_score_order() {
        let directory = Directory {
            listings: vec![listing("a", 9.0), listing("b", 7.0), listing("c", 5.0)],
            featured_limit: Some(2),
            featured_slots: vec![slot("HERO", "c")],
            ..Directory::default()
        };

        let segments = segment_featured_listings(&directory);
        assert_eq!(
            segments.hero.expect("curated hero wins").listing.slug.as_deref(),
            Some("c")
        );
        // no premium slot was curated, so fallback still fills tier two
        assert_eq!(segments.tier_two[0].listing.slug.as_deref(), Some("a"));
        assert_eq!(slugs(&segments.remaining_listings), vec!["b"]);
    }

    #[test]
    fn non_positive_limit_disables_featuring() {
        let directory = Directory {
            listings: vec![listing("a", 1.0), listing("b", 2.0)],
            featured_limit: Some(0),
            featured_slots: vec![slot("hero", "a")],
            ..Directory::default()
        };

        let segments = segment_featured_listings(&directory);
        assert!(segments.hero.is_none());
        assert!(segments.tier_two.is_empty());
        assert_eq!(slugs(&segments.remaining_listings), vec!["b", "a"]);
    }

    #[test]
    fn empty_directory_has_no_hero() {
        let segments = segment_featured_listings(&Directory::default());
        assert!(segments.hero.is_none());
        assert!(segments.tier_two.is_empty());
        assert!(segments.remaining_listings.is_empty());
    }

    #[test]
    fn ties_keep_authored_order() {
        let directory = Directory {
            listings: vec![listing("first", 5.0), listing("second", 5.0), listing("third", 5.0)],
            ..Directory::default()
        };

        let segments = segment_featured_listings(&directory);
        assert_eq!(
            segments.hero.expect("hero present").listing.slug.as_deref(),
            Some("first")
        );
        assert_eq!(segments.tier_two[0].listing.slug.as_deref(), Some("second"));
        assert_eq!(segments.tier_two[1].listing.slug.as_deref(), Some("third"));
    }
}
