use std::sync::Arc;

use crate::catalog::{find_directory_by_slug, CatalogProvider, Directory, DirectoryRegistry};
use crate::config::RoutingConfig;
use crate::featured::{
    build_subcategory_filter_nav, segment_featured_listings, FeaturedSegments, SubcategoryNavItem,
};
use crate::routing::resolver::{resolve_request, Disposition};

/// Service composing the registry cache with the static routing
/// configuration, so request handlers and CLI commands share one
/// resolution surface.
pub struct DirectoryGateway<P> {
    registry: Arc<DirectoryRegistry<P>>,
    routing: RoutingConfig,
}

impl<P: CatalogProvider> DirectoryGateway<P> {
    pub fn new(registry: Arc<DirectoryRegistry<P>>, routing: RoutingConfig) -> Self {
        Self { registry, routing }
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Routes one inbound request against the current catalog snapshot.
    pub fn resolve(&self, hostname: &str, path: &str, query: Option<&str>) -> Disposition {
        let directories = self.registry.directories();
        resolve_request(&directories, &self.routing, hostname, path, query)
    }

    /// Directory lookup by normalized slug, for page rendering.
    pub fn directory(&self, slug: &str) -> Option<Directory> {
        let directories = self.registry.directories();
        find_directory_by_slug(&directories, slug).cloned()
    }

    pub fn featured(&self, slug: &str) -> Option<FeaturedSegments> {
        self.directory(slug)
            .map(|directory| segment_featured_listings(&directory))
    }

    pub fn subcategory_nav(
        &self,
        slug: &str,
        active: Option<&str>,
    ) -> Option<Vec<SubcategoryNavItem>> {
        self.directory(slug)
            .map(|directory| build_subcategory_filter_nav(&directory, active))
    }
}
