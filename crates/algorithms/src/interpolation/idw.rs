//! Anisotropic Inverse Distance Weighting (IDW) on a curvilinear grid
//!
//! Estimates the elevation of every grid cell as a weighted average of the
//! nearest grid-indexed samples. Distances are measured in grid-index
//! space, with the along-river (row) separation divided by an anisotropy
//! factor: bed elevation correlates further along the flow than across it.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use crate::maybe_rayon::*;
use riverbed_core::{Algorithm, CurvilinearGrid, ElevationField, Error, IndexedSample, Result};

/// Parameters for anisotropic IDW interpolation
#[derive(Debug, Clone)]
pub struct IdwParams {
    /// Divisor applied to row (along-river) index differences (default: 20.0)
    pub anisotropy: f64,
    /// Maximum number of nearest samples per cell (default: 10)
    pub neighbour_cap: usize,
    /// Power parameter (default: 1.0)
    pub power: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            anisotropy: 20.0,
            neighbour_cap: 10,
            power: 1.0,
        }
    }
}

impl IdwParams {
    fn validate(&self) -> Result<()> {
        if !(self.anisotropy > 0.0 && self.anisotropy.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "anisotropy",
                value: self.anisotropy.to_string(),
                reason: "must be a positive number".into(),
            });
        }
        if self.neighbour_cap == 0 {
            return Err(Error::InvalidParameter {
                name: "neighbour_cap",
                value: "0".into(),
                reason: "at least one neighbour is needed".into(),
            });
        }
        if !self.power.is_finite() {
            return Err(Error::InvalidParameter {
                name: "power",
                value: self.power.to_string(),
                reason: "must be finite".into(),
            });
        }
        Ok(())
    }
}

/// IDW interpolation algorithm
#[derive(Debug, Clone, Default)]
pub struct AnisotropicIdw;

impl Algorithm for AnisotropicIdw {
    type Input = (CurvilinearGrid, Vec<IndexedSample>);
    type Output = ElevationField;
    type Params = IdwParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "AnisotropicIdw"
    }

    fn description(&self) -> &'static str {
        "Fill every grid cell by anisotropic inverse distance weighting of indexed samples"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (grid, samples) = input;
        anisotropic_idw(&grid, &samples, params)
    }
}

/// Grid-index distance from cell (row, col) to a sample, without offset.
///
/// ```text
/// d = sqrt(((row - r) / anisotropy)² + (col - c)²)
/// ```
#[inline]
pub fn index_distance(row: usize, col: usize, sample: &IndexedSample, anisotropy: f64) -> f64 {
    let dr = (sample.row as f64 - row as f64) / anisotropy;
    let dc = sample.col as f64 - col as f64;
    (dr * dr + dc * dc).sqrt()
}

/// Interpolate an elevation for every grid cell.
///
/// # Algorithm
///
/// For each cell (i, j):
///
/// ```text
/// d_k = index_distance(i, j, sample_k) + dx / 10
/// keep the neighbour_cap smallest d_k
/// z(i,j) = Σ(z_k / d_k^p) / Σ(1 / d_k^p)
/// ```
///
/// The `dx / 10` offset keeps a sample's own cell at a large but finite
/// weight.
///
/// # Arguments
/// * `grid` - Grid to fill
/// * `samples` - Samples already bound to grid cells
/// * `params` - Anisotropy, neighbour cap and power
///
/// # Returns
/// One elevation per grid cell. Fails with `EmptySampleSet` when there is
/// nothing to interpolate from.
pub fn anisotropic_idw(
    grid: &CurvilinearGrid,
    samples: &[IndexedSample],
    params: IdwParams,
) -> Result<ElevationField> {
    params.validate()?;
    if samples.is_empty() {
        return Err(Error::EmptySampleSet);
    }

    let (rows, cols) = grid.shape();
    let eps = grid.dx() / 10.0;
    let anisotropy = params.anisotropy;
    let power = params.power;
    let cap = params.neighbour_cap;

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            let mut candidates: Vec<(f64, f64)> = Vec::with_capacity(samples.len());

            for (col, cell) in row_data.iter_mut().enumerate() {
                candidates.clear();
                candidates.extend(
                    samples
                        .iter()
                        .map(|s| (index_distance(row, col, s, anisotropy) + eps, s.value)),
                );

                // Stable sort keeps input order between equidistant samples
                candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
                candidates.truncate(cap);

                let mut sum_w = 0.0;
                let mut sum_wz = 0.0;
                for &(d, z) in &candidates {
                    let dp = d.powf(power);
                    sum_wz += z / dp;
                    sum_w += 1.0 / dp;
                }

                *cell = sum_wz / sum_w;
            }

            row_data
        })
        .collect();

    tracing::debug!(rows, cols, samples = samples.len(), "interpolated elevation field");

    ElevationField::new(grid, data)
}
