//! Cross-section series and derived geometry

mod outline;
mod series;

pub use outline::river_outline;
pub use series::CrossSectionSeries;
