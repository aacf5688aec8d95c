use directory_hub::catalog::{Directory, EntryRef, FeaturedSlot, FeaturedTier, Listing};
use directory_hub::featured::segment_featured_listings;
use std::collections::HashSet;

fn listing(slug: &str, score: f64) -> Listing {
    Listing {
        slug: Some(slug.to_string()),
        score: Some(score),
        ..Listing::default()
    }
}

fn slot(tier: &str, position: i64, listing: &str) -> FeaturedSlot {
    FeaturedSlot {
        tier: Some(tier.to_string()),
        position: Some(position),
        listing: Some(EntryRef::Slug(listing.to_string())),
        ..FeaturedSlot::default()
    }
}

fn directory(listings: Vec<Listing>, slots: Vec<FeaturedSlot>, limit: Option<i64>) -> Directory {
    Directory {
        slug: "nyc-plumbers".to_string(),
        listings,
        featured_slots: slots,
        featured_limit: limit,
        ..Directory::default()
    }
}

fn placement_slug(placement: &directory_hub::featured::FeaturedPlacement) -> String {
    placement.listing.normalized_slug().expect("placed listing has a slug")
}

#[test]
fn curated_slots_fill_tiers_by_rank_then_position() {
    let dir = directory(
        vec![
            listing("a", 9.0),
            listing("b", 7.0),
            listing("c", 5.0),
            listing("d", 3.0),
        ],
        vec![
            slot("premium", 2, "d"),
            slot("premium", 1, "c"),
            slot("hero", 1, "b"),
        ],
        Some(3),
    );

    let segments = segment_featured_listings(&dir);
    assert_eq!(placement_slug(&segments.hero.expect("curated hero")), "b");
    let tier_two: Vec<String> = segments.tier_two.iter().map(placement_slug).collect();
    assert_eq!(tier_two, vec!["c", "d"], "premium slots ordered by position");
    assert_eq!(
        segments.remaining_listings[0].slug.as_deref(),
        Some("a"),
        "unfeatured listings stay in score order"
    );
}

#[test]
fn partially_curated_premium_capacity_is_not_backfilled() {
    let dir = directory(
        vec![
            listing("a", 9.0),
            listing("b", 7.0),
            listing("c", 5.0),
            listing("d", 3.0),
        ],
        vec![slot("premium", 1, "c")],
        Some(3),
    );

    let segments = segment_featured_listings(&dir);
    // hero falls back to the top-scoring listing
    assert_eq!(placement_slug(&segments.hero.expect("fallback hero")), "a");
    // one curated premium slot, capacity two: the spare seat stays
    // empty so curation is not diluted by score fallback
    let tier_two: Vec<String> = segments.tier_two.iter().map(placement_slug).collect();
    assert_eq!(tier_two, vec!["c"]);
    let remaining: Vec<_> = segments
        .remaining_listings
        .iter()
        .filter_map(|l| l.slug.clone())
        .collect();
    assert_eq!(remaining, vec!["b", "d"]);
}

#[test]
fn invalid_slots_are_discarded_silently() {
    let dir = directory(
        vec![listing("a", 9.0), listing("b", 7.0)],
        vec![
            slot("standard", 1, "a"),                  // tier never curated
            slot("hero", 1, "ghost"),                  // unresolvable reference
            FeaturedSlot::default(),                   // nothing at all
            FeaturedSlot {
                tier: Some("premium".to_string()),
                ..FeaturedSlot::default()
            }, // no listing reference
        ],
        Some(2),
    );

    let segments = segment_featured_listings(&dir);
    // every curated slot was invalid, so pure fallback applies
    assert_eq!(placement_slug(&segments.hero.expect("fallback hero")), "a");
    assert_eq!(segments.tier_two.len(), 1);
    assert_eq!(placement_slug(&segments.tier_two[0]), "b");
}

#[test]
fn duplicate_slot_references_collapse_to_the_first() {
    let dir = directory(
        vec![listing("a", 9.0), listing("b", 7.0), listing("c", 5.0)],
        vec![
            slot("premium", 1, "b"),
            slot("premium", 2, "b"),
            slot("premium", 3, "B!"), // same slug after normalization
        ],
        Some(3),
    );

    let segments = segment_featured_listings(&dir);
    let tier_two: Vec<String> = segments.tier_two.iter().map(placement_slug).collect();
    assert_eq!(tier_two, vec!["b"], "one placement per slug");
}

#[test]
fn no_listing_is_featured_twice() {
    let dir = directory(
        vec![
            listing("a", 9.0),
            listing("b", 7.0),
            listing("c", 5.0),
            listing("d", 1.0),
        ],
        vec![slot("hero", 1, "a"), slot("premium", 1, "a"), slot("premium", 2, "b")],
        Some(4),
    );

    let segments = segment_featured_listings(&dir);
    let mut seen = HashSet::new();
    if let Some(hero) = &segments.hero {
        seen.insert(placement_slug(hero));
    }
    for placement in &segments.tier_two {
        assert!(seen.insert(placement_slug(placement)), "duplicate featured slug");
    }
    for listing in &segments.remaining_listings {
        let slug = listing.normalized_slug().expect("slug present");
        assert!(!seen.contains(&slug), "featured listing leaked into remaining");
    }
}

#[test]
fn capacity_is_respected() {
    let dir = directory(
        (0..10).map(|i| listing(&format!("l{i}"), 10.0 - i as f64)).collect(),
        Vec::new(),
        Some(3),
    );

    let segments = segment_featured_listings(&dir);
    assert!(segments.hero.is_some());
    assert!(segments.tier_two.len() <= 2);
    assert_eq!(segments.remaining_listings.len(), 7);
}

#[test]
fn segmentation_is_deterministic() {
    let dir = directory(
        vec![
            listing("a", 5.0),
            listing("b", 5.0),
            Listing {
                name: Some("No Score".to_string()),
                ..Listing::default()
            },
            listing("d", 7.0),
        ],
        vec![slot("premium", 1, "b")],
        None,
    );

    let first = segment_featured_listings(&dir);
    let second = segment_featured_listings(&dir);

    let order = |segments: &directory_hub::featured::FeaturedSegments| {
        (
            segments.hero.as_ref().map(placement_slug),
            segments.tier_two.iter().map(placement_slug).collect::<Vec<_>>(),
            segments
                .remaining_listings
                .iter()
                .map(|l| l.display_name())
                .collect::<Vec<_>>(),
        )
    };
    assert_eq!(order(&first), order(&second));
    // absent scores sort last
    assert_eq!(
        first.remaining_listings.last().expect("remainder").display_name(),
        "No Score"
    );
}

#[test]
fn slugless_listings_are_placed_only_by_fallback() {
    let dir = directory(
        vec![
            Listing {
                score: Some(9.0),
                ..Listing::default()
            },
            listing("b", 7.0),
        ],
        vec![slot("hero", 1, "b")],
        Some(1),
    );

    let segments = segment_featured_listings(&dir);
    assert_eq!(placement_slug(&segments.hero.expect("curated hero")), "b");
    assert!(segments.tier_two.is_empty(), "capacity exhausted by hero");
    assert_eq!(segments.remaining_listings.len(), 1);
    assert!(segments.remaining_listings[0].normalized_slug().is_none());
}

#[test]
fn hero_tier_labels_default_by_tier() {
    let dir = directory(
        vec![listing("a", 9.0), listing("b", 7.0)],
        vec![FeaturedSlot {
            tier: Some("hero".to_string()),
            label: Some("  ".to_string()), // blank labels fall back too
            listing: Some(EntryRef::Slug("a".to_string())),
            ..FeaturedSlot::default()
        }],
        Some(2),
    );

    let segments = segment_featured_listings(&dir);
    let hero = segments.hero.expect("hero");
    assert_eq!(hero.tier, FeaturedTier::Hero);
    assert_eq!(hero.label, "Top pick");
    assert_eq!(segments.tier_two[0].label, "Tier-two highlight");
}
