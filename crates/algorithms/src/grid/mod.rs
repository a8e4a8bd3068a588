//! Curvilinear grid generation

mod builder;

pub use builder::{build_grid, grid_dimensions, GridBuilder, GridParams};
