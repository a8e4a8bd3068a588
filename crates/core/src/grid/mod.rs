//! Curvilinear grid and elevation field structures

mod curvilinear;
mod field;

pub use curvilinear::CurvilinearGrid;
pub use field::{ElevationField, FieldStatistics};
