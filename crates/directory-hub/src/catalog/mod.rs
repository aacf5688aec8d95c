pub mod domain;
mod provider;
mod registry;

pub use domain::{
    find_directory_by_slug, Directory, EntryRef, FeaturedSlot, FeaturedTier, Listing, TaxonomyRef,
};
pub use provider::{CatalogError, CatalogProvider};
pub use registry::{DirectoryRegistry, DEFAULT_CATALOG_TTL_SECONDS};
