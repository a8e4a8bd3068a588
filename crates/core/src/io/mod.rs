//! I/O operations for reading and writing river data as GeoJSON

mod collection;
mod river;

pub use collection::{
    collection_crs, collection_name, named_collection, parse_feature_collection,
    read_feature_collection, write_feature_collection,
};
pub use river::{
    cross_sections_from_features, elevation_features, read_cross_sections, read_samples,
    samples_from_features, write_elevation_field, write_outline,
};
