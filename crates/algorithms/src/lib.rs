//! # riverbed algorithms
//!
//! River-bed elevation surfaces from cross-sections and scattered samples.
//!
//! ## Modules
//!
//! - **section**: ordered cross-section series with stations, channel outline
//! - **grid**: curvilinear grid that follows the channel
//! - **interpolation**: nearest-cell sample mapping, anisotropic IDW
//! - **pipeline**: the stages above chained behind an instrumentation hook

pub mod grid;
pub mod interpolation;
mod maybe_rayon;
pub mod pipeline;
pub mod section;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::grid::{build_grid, GridBuilder, GridParams};
    pub use crate::interpolation::{
        anisotropic_idw, map_samples, AnisotropicIdw, IdwParams, MapParams,
    };
    pub use crate::pipeline::{Pipeline, PipelineOutput};
    pub use crate::section::{river_outline, CrossSectionSeries};
    pub use riverbed_core::prelude::*;
}
