//! Sample mapping and interpolation on the curvilinear grid
//!
//! - Mapping: bind scattered samples to their nearest grid cell
//! - IDW: anisotropic inverse distance weighting in grid-index space

mod idw;
mod mapping;

pub use idw::{anisotropic_idw, index_distance, AnisotropicIdw, IdwParams};
pub use mapping::{map_samples, nearest_cell, MapParams};
