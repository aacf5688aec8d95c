use directory_hub::catalog::{
    CatalogError, CatalogProvider, Directory, EntryRef, FeaturedSlot, Listing, TaxonomyRef,
};
use directory_hub::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog provider backed by a fixed in-memory list, loaded from a
/// JSON file or from the built-in sample catalog. Stands in for the
/// authoring system's API in single-node deployments and demos.
#[derive(Clone, Default)]
pub(crate) struct StaticCatalogProvider {
    directories: Arc<Vec<Directory>>,
}

impl StaticCatalogProvider {
    pub(crate) fn new(directories: Vec<Directory>) -> Self {
        Self {
            directories: Arc::new(directories),
        }
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let directories = parse_catalog(&raw)?;
        Ok(Self::new(directories))
    }
}

impl CatalogProvider for StaticCatalogProvider {
    fn fetch_directory_catalog(&self) -> Result<Vec<Directory>, CatalogError> {
        Ok((*self.directories).clone())
    }
}

pub(crate) fn parse_catalog(raw: &str) -> Result<Vec<Directory>, CatalogError> {
    serde_json::from_str(raw).map_err(|err| CatalogError::Malformed(err.to_string()))
}

/// Sample catalog used when `CATALOG_FILE` is unset, so `serve` and
/// the demo commands work out of the box.
pub(crate) fn sample_catalog() -> Vec<Directory> {
    vec![
        Directory {
            slug: "nyc-plumbers".to_string(),
            name: Some("NYC Plumbers".to_string()),
            subdomain: Some("nyc-plumbers".to_string()),
            subdirectory: Some("nyc/plumbers".to_string()),
            category: Some(TaxonomyRef {
                slug: "plumbers".to_string(),
                name: Some("Plumbers".to_string()),
            }),
            location: Some(TaxonomyRef {
                slug: "nyc".to_string(),
                name: Some("New York City".to_string()),
            }),
            featured_limit: Some(3),
            featured_slots: vec![FeaturedSlot {
                tier: Some("hero".to_string()),
                position: Some(1),
                label: Some("Editor's choice".to_string()),
                listing: Some(EntryRef::Slug("harbor-plumbing".to_string())),
            }],
            listings: vec![
                Listing {
                    slug: Some("harbor-plumbing".to_string()),
                    name: Some("Harbor Plumbing".to_string()),
                    score: Some(8.1),
                    subcategories: vec![EntryRef::Slug("drain-cleaning".to_string())],
                    ..Listing::default()
                },
                Listing {
                    slug: Some("five-boro-pipeworks".to_string()),
                    name: Some("Five Boro Pipeworks".to_string()),
                    score: Some(9.4),
                    subcategories: vec![
                        EntryRef::Slug("drain-cleaning".to_string()),
                        EntryRef::Descriptor {
                            slug: Some("boilers".to_string()),
                            name: Some("Boiler Repair".to_string()),
                            description: None,
                        },
                    ],
                    ..Listing::default()
                },
                Listing {
                    slug: Some("midtown-drains".to_string()),
                    name: Some("Midtown Drains".to_string()),
                    score: Some(6.7),
                    ..Listing::default()
                },
            ],
        },
        Directory {
            slug: "austin-electricians".to_string(),
            name: Some("Austin Electricians".to_string()),
            subdomain: Some("austin-electricians".to_string()),
            subdirectory: Some("austin/electricians".to_string()),
            category: Some(TaxonomyRef {
                slug: "electricians".to_string(),
                name: Some("Electricians".to_string()),
            }),
            location: Some(TaxonomyRef {
                slug: "austin".to_string(),
                name: Some("Austin".to_string()),
            }),
            listings: vec![
                Listing {
                    slug: Some("lone-star-electric".to_string()),
                    name: Some("Lone Star Electric".to_string()),
                    score: Some(7.9),
                    ..Listing::default()
                },
                Listing {
                    slug: Some("violet-crown-wiring".to_string()),
                    name: Some("Violet Crown Wiring".to_string()),
                    score: Some(7.2),
                    ..Listing::default()
                },
            ],
            ..Directory::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_round_trips_through_json() {
        let serialized = serde_json::to_string(&sample_catalog()).expect("catalog serializes");
        let parsed = parse_catalog(&serialized).expect("catalog parses");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].slug, "nyc-plumbers");
        assert_eq!(parsed[0].listings.len(), 3);
    }

    #[test]
    fn malformed_catalog_reports_a_catalog_error() {
        let error = parse_catalog("{not json").expect_err("parse fails");
        assert!(matches!(error, CatalogError::Malformed(_)));
    }
}
