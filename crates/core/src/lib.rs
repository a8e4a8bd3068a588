//! # riverbed core
//!
//! Core types, errors and I/O for deriving river-bed elevation surfaces.
//!
//! This crate provides:
//! - `CrossSection` and `SamplePoint`: the raw inputs
//! - `CurvilinearGrid`: a structured grid that follows the channel
//! - `ElevationField`: the interpolated result
//! - `CRS`: coordinate reference system bookkeeping (no reprojection)
//! - `Observer`: instrumentation hook for pipeline stages
//! - GeoJSON I/O for sections, samples, outlines and results

pub mod crs;
pub mod error;
pub mod grid;
pub mod io;
pub mod observe;
pub mod sample;
pub mod section;

pub use crs::CRS;
pub use error::{Error, Result};
pub use grid::{CurvilinearGrid, ElevationField};
pub use observe::{NoopObserver, Observer, Stage, StageSummary};
pub use sample::{IndexedSample, SamplePoint};
pub use section::CrossSection;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::grid::{CurvilinearGrid, ElevationField};
    pub use crate::observe::{NoopObserver, Observer, Stage};
    pub use crate::sample::{IndexedSample, SamplePoint};
    pub use crate::section::CrossSection;
    pub use crate::Algorithm;
}

/// Core trait for the algorithms of the pipeline.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
