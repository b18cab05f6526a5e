// Public modules
pub mod error;
pub mod facets;
pub mod filtering;
pub mod grouping;
pub mod io;
pub mod models;
pub mod notify;
pub mod schema;
pub mod schema_validation;
pub mod session;
pub mod sorting;
pub mod store;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::CatalogError;
pub use facets::{
    build_facet_groups, build_subcategory_facets, Facet, FacetGroupKey, FacetGroupSet, ProductFacets,
    ServiceFacets,
};
pub use filtering::{filter_catalog, filter_for_mode, filter_services_by_clinic, matches_filters, ActiveFilters};
pub use grouping::{get_sorted_group_names, group_items_by_facet, ItemGroup, UNSPECIFIED_GROUP};
pub use io::{load_bundle, parse_bundle, save_bundle};
pub use models::{
    permitted_subcategories, resolve_category, CatalogBundle, CatalogItem, Catalogs, CategoryMapEntry, Mode,
};
pub use notify::{FilterChange, FilterListener, NoopListener, Notifier, RecordingListener};
pub use schema::bundle_json_schema;
pub use schema_validation::validate_against_schema;
pub use session::FilterSession;
pub use sorting::{normalize_for_sorting, sort_items, strip_leading_articles, SortKey};
pub use store::FilterStore;
pub use validation::{validate_bundle, validate_category_map, validate_items};
