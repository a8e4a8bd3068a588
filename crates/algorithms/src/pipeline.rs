//! End-to-end river-bed interpolation
//!
//! Chains series construction, grid building, sample mapping and IDW,
//! reporting each stage to an [`Observer`]. Any error aborts the run; there
//! is no partial result.

use riverbed_core::{
    CrossSection, CurvilinearGrid, ElevationField, Error, IndexedSample, Observer, Result,
    SamplePoint, Stage, StageSummary,
};

use crate::grid::{build_grid, GridParams};
use crate::interpolation::{anisotropic_idw, map_samples, IdwParams, MapParams};
use crate::section::CrossSectionSeries;

/// Parameters for every stage of a run
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub grid: GridParams,
    pub map: MapParams,
    pub idw: IdwParams,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub series: CrossSectionSeries,
    pub grid: CurvilinearGrid,
    /// Samples bound to their nearest cell, in input order
    pub mapped: Vec<IndexedSample>,
    /// Samples discarded as out of reach of the grid
    pub dropped: usize,
    pub field: ElevationField,
}

impl Pipeline {
    /// Default parameters with grid spacing `dx`
    pub fn with_spacing(dx: f64) -> Self {
        Self {
            grid: GridParams { dx },
            ..Default::default()
        }
    }

    /// Run every stage on the given inputs
    pub fn run(
        &self,
        sections: &[CrossSection],
        samples: &[SamplePoint],
        observer: &dyn Observer,
    ) -> Result<PipelineOutput> {
        let series = stage(observer, Stage::BuildSeries, || {
            let series = CrossSectionSeries::new(sections.to_vec())?;
            let summary = format!(
                "{} sections, {:.3} long, {:.3} wide on average",
                series.len(),
                series.total_length(),
                series.average_width()
            );
            Ok((series, summary))
        })?;

        let grid = stage(observer, Stage::BuildGrid, || {
            let grid = build_grid(&series, self.grid.clone())?;
            let summary = format!("{} rows x {} cols", grid.rows(), grid.cols());
            Ok((grid, summary))
        })?;

        let mapped = stage(observer, Stage::MapSamples, || {
            let mapped = map_samples(&grid, samples, self.map.clone())?;
            let summary = format!(
                "{} of {} samples on the grid",
                mapped.len(),
                samples.len()
            );
            Ok((mapped, summary))
        })?;
        if mapped.is_empty() {
            return Err(Error::EmptySampleSet);
        }

        let field = stage(observer, Stage::Interpolate, || {
            let field = anisotropic_idw(&grid, &mapped, self.idw.clone())?;
            let summary = format!("{} cells", field.len());
            Ok((field, summary))
        })?;

        Ok(PipelineOutput {
            series,
            grid,
            dropped: samples.len() - mapped.len(),
            mapped,
            field,
        })
    }
}

fn stage<T>(
    observer: &dyn Observer,
    stage: Stage,
    f: impl FnOnce() -> Result<(T, String)>,
) -> Result<T> {
    observer.stage_started(stage);
    let (value, summary) = f()?;
    observer.stage_finished(stage, &StageSummary(summary));
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;
    use riverbed_core::NoopObserver;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl Observer for Recorder {
        fn stage_started(&self, stage: Stage) {
            self.events.borrow_mut().push(format!("enter {}", stage));
        }

        fn stage_finished(&self, stage: Stage, _summary: &StageSummary) {
            self.events.borrow_mut().push(format!("exit {}", stage));
        }
    }

    fn sections() -> Vec<CrossSection> {
        vec![
            CrossSection::new(0.0, coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 }),
            CrossSection::new(1.0, coord! { x: 0.0, y: 10.0 }, coord! { x: 4.0, y: 10.0 }),
        ]
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let recorder = Recorder::default();
        let samples = [SamplePoint::new(2.0, 5.0, 1.0)];
        Pipeline::with_spacing(1.0)
            .run(&sections(), &samples, &recorder)
            .unwrap();

        assert_eq!(
            *recorder.events.borrow(),
            vec![
                "enter build_series",
                "exit build_series",
                "enter build_grid",
                "exit build_grid",
                "enter map_samples",
                "exit map_samples",
                "enter interpolate",
                "exit interpolate",
            ]
        );
    }

    #[test]
    fn test_failure_stops_run() {
        let recorder = Recorder::default();
        let result = Pipeline::with_spacing(1.0).run(&sections()[..1], &[], &recorder);

        assert!(matches!(result, Err(Error::DegenerateInput(_))));
        assert_eq!(*recorder.events.borrow(), vec!["enter build_series"]);
    }

    #[test]
    fn test_all_samples_dropped() {
        let samples = [SamplePoint::new(1000.0, 1000.0, 1.0)];
        let result = Pipeline::with_spacing(1.0).run(&sections(), &samples, &NoopObserver);
        assert!(matches!(result, Err(Error::EmptySampleSet)));
    }

    #[test]
    fn test_dropped_count() {
        // Cell (4, 1) sits at (4/3, 40/9)
        let samples = [
            SamplePoint::new(1.3, 4.4, 1.0),
            SamplePoint::new(1000.0, 1000.0, 9.0),
        ];
        let out = Pipeline::with_spacing(1.0)
            .run(&sections(), &samples, &NoopObserver)
            .unwrap();
        assert_eq!(out.mapped, vec![IndexedSample::new(4, 1, 1.0)]);
        assert_eq!(out.dropped, 1);
        assert_eq!(out.field.shape(), out.grid.shape());
    }
}
