//! Binding scattered samples to grid cells
//!
//! Each sample is attached to the grid cell whose world coordinate is
//! closest to it. Samples that are far from every cell lie outside the
//! channel and are dropped.

use crate::maybe_rayon::*;
use riverbed_core::{CurvilinearGrid, Error, IndexedSample, Result, SamplePoint};

/// Parameters for sample mapping
#[derive(Debug, Clone)]
pub struct MapParams {
    /// Samples farther than `search_factor * dx` from every cell are
    /// dropped (default: 10.0)
    pub search_factor: f64,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            search_factor: 10.0,
        }
    }
}

/// Nearest grid cell to `sample` as `(row, col, squared distance)`.
///
/// Exhaustive scan in row-major order; on ties the first cell wins.
/// Returns `None` for an empty grid or a non-finite sample position.
pub fn nearest_cell(grid: &CurvilinearGrid, sample: &SamplePoint) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (row, col, p) in grid.cells() {
        let dsq = sample.dist_sq(p.x, p.y);
        if best.map_or(dsq.is_finite(), |(_, _, b)| dsq < b) {
            best = Some((row, col, dsq));
        }
    }
    best
}

/// Map scattered samples onto the grid.
///
/// # Arguments
/// * `grid` - Grid to bind samples to
/// * `samples` - Scattered elevation samples
/// * `params` - Search distance
///
/// # Returns
/// The samples within reach of the grid, in input order, each carrying the
/// (row, col) of its nearest cell. May be empty.
pub fn map_samples(
    grid: &CurvilinearGrid,
    samples: &[SamplePoint],
    params: MapParams,
) -> Result<Vec<IndexedSample>> {
    let factor = params.search_factor;
    if !(factor > 0.0 && factor.is_finite()) {
        return Err(Error::InvalidParameter {
            name: "search_factor",
            value: factor.to_string(),
            reason: "must be a positive number".into(),
        });
    }

    let reach = factor * grid.dx();
    let max_dist_sq = reach * reach;

    let mapped: Vec<IndexedSample> = samples
        .into_par_iter()
        .filter_map(|sample| {
            let (row, col, dsq) = nearest_cell(grid, sample)?;
            (dsq <= max_dist_sq).then(|| IndexedSample::new(row, col, sample.value))
        })
        .collect();

    tracing::debug!(
        kept = mapped.len(),
        dropped = samples.len() - mapped.len(),
        "mapped samples to grid"
    );

    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 rows x 2 cols, unit spacing, origin at (0, 0)
    fn unit_grid() -> CurvilinearGrid {
        CurvilinearGrid::from_vecs(
            vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0],
            vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0],
            3,
            2,
            1.0,
        )
        .unwrap()
    }

    fn at(x: f64, y: f64) -> SamplePoint {
        SamplePoint::new(x, y, 0.0)
    }

    #[test]
    fn test_nearest_cell() {
        let grid = unit_grid();
        assert_eq!(nearest_cell(&grid, &at(0.9, 1.8)).map(|(r, c, _)| (r, c)), Some((2, 1)));
        assert_eq!(nearest_cell(&grid, &at(-3.0, -3.0)).map(|(r, c, _)| (r, c)), Some((0, 0)));
    }

    #[test]
    fn test_nearest_cell_reports_squared_distance() {
        let sample = at(1.0, 5.0);
        let (row, col, dsq) = nearest_cell(&unit_grid(), &sample).unwrap();
        assert_eq!((row, col), (2, 1));
        assert_eq!(dsq, 9.0);
        assert_eq!(dsq, sample.dist_sq(1.0, 2.0));
    }

    #[test]
    fn test_nearest_cell_tie_prefers_first() {
        let grid = unit_grid();
        let (row, col, _) = nearest_cell(&grid, &at(0.5, 0.5)).unwrap();
        assert_eq!((row, col), (0, 0));
    }

    #[test]
    fn test_nearest_cell_nan() {
        assert!(nearest_cell(&unit_grid(), &at(f64::NAN, 0.0)).is_none());
    }

    #[test]
    fn test_map_keeps_order_and_values() {
        let samples = vec![
            SamplePoint::new(1.1, 2.1, 7.0),
            SamplePoint::new(0.0, 0.2, 3.0),
        ];
        let mapped = map_samples(&unit_grid(), &samples, MapParams::default()).unwrap();
        assert_eq!(
            mapped,
            vec![IndexedSample::new(2, 1, 7.0), IndexedSample::new(0, 0, 3.0)]
        );
    }

    #[test]
    fn test_far_samples_dropped() {
        // 10 * dx = 10 units of reach
        let samples = vec![
            SamplePoint::new(1.0, 12.0, 1.0),
            SamplePoint::new(1.0, 12.5, 2.0),
            SamplePoint::new(100.0, 100.0, 3.0),
        ];
        let mapped = map_samples(&unit_grid(), &samples, MapParams::default()).unwrap();
        assert_eq!(mapped, vec![IndexedSample::new(2, 1, 1.0)]);
    }

    #[test]
    fn test_all_dropped_is_not_an_error() {
        let samples = vec![SamplePoint::new(500.0, 0.0, 1.0)];
        let mapped = map_samples(&unit_grid(), &samples, MapParams::default()).unwrap();
        assert!(mapped.is_empty());
    }

    #[test]
    fn test_invalid_search_factor() {
        let result = map_samples(&unit_grid(), &[], MapParams { search_factor: 0.0 });
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "search_factor", .. })
        ));
    }
}
