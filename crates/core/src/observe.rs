//! Instrumentation hook for pipeline stages
//!
//! Algorithms never log on their own behalf at info level. A caller that
//! wants to trace a run passes an [`Observer`], which is told when each
//! stage starts and finishes.

use std::fmt;

/// A step of the interpolation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Sorting sections and deriving stations
    BuildSeries,
    /// Building the curvilinear grid
    BuildGrid,
    /// Binding samples to grid cells
    MapSamples,
    /// Anisotropic IDW over every cell
    Interpolate,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::BuildSeries => "build_series",
            Stage::BuildGrid => "build_grid",
            Stage::MapSamples => "map_samples",
            Stage::Interpolate => "interpolate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Short description of what a stage produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary(pub String);

impl fmt::Display for StageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receives stage boundaries from a running pipeline.
pub trait Observer {
    /// Called before a stage runs
    fn stage_started(&self, _stage: Stage) {}

    /// Called after a stage completed successfully
    fn stage_finished(&self, _stage: Stage, _summary: &StageSummary) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
