mod segmenter;
mod subcategories;

pub use segmenter::{
    segment_featured_listings, FeaturedPlacement, FeaturedSegments, DEFAULT_FEATURED_LIMIT,
};
pub use subcategories::{
    build_directory_subcategories, build_subcategory_filter_nav, SubcategoryFacet,
    SubcategoryNavItem,
};
