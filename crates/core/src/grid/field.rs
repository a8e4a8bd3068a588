//! Interpolated elevation field

use crate::error::{Error, Result};
use crate::grid::CurvilinearGrid;
use ndarray::{Array2, ArrayView2};

/// One elevation per grid cell, paired with the cell's world coordinate.
///
/// This is the final artifact of a run. Values are stored in the same
/// row-major (row, col) layout as the grid they were computed on.
#[derive(Debug, Clone)]
pub struct ElevationField {
    xs: Array2<f64>,
    ys: Array2<f64>,
    z: Array2<f64>,
}

impl ElevationField {
    /// Attach row-major elevations to the cells of `grid`
    pub fn new(grid: &CurvilinearGrid, values: Vec<f64>) -> Result<Self> {
        let (rows, cols) = grid.shape();
        if values.len() != rows * cols {
            return Err(Error::Other(format!(
                "expected {} elevations for a {}x{} grid, got {}",
                rows * cols,
                rows,
                cols,
                values.len()
            )));
        }

        let z = Array2::from_shape_vec((rows, cols), values)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self {
            xs: grid.xs().to_owned(),
            ys: grid.ys().to_owned(),
            z,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.z.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.z.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.z.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Whether the field is empty
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Elevation at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.z
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// View of the elevations
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.z.view()
    }

    /// `(x, y, z)` triples in row-major order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .zip(self.z.iter())
            .map(|((&x, &y), &z)| (x, y, z))
    }

    /// Basic statistics over the finite elevations
    pub fn statistics(&self) -> FieldStatistics {
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &value in self.z.iter().filter(|v| v.is_finite()) {
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
            sum += value;
            count += 1;
        }

        FieldStatistics {
            min,
            max,
            mean: (count > 0).then(|| sum / count as f64),
            valid_count: count,
        }
    }
}

/// Basic statistics for an elevation field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStatistics {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub valid_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> CurvilinearGrid {
        CurvilinearGrid::from_vecs(
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
            2,
            2,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_field_points() {
        let field = ElevationField::new(&grid_2x2(), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let points: Vec<_> = field.points().collect();
        assert_eq!(points[0], (0.0, 0.0, 1.0));
        assert_eq!(points[3], (1.0, 1.0, 4.0));
        assert_eq!(field.get(1, 0).unwrap(), 3.0);
    }

    #[test]
    fn test_field_statistics() {
        let field = ElevationField::new(&grid_2x2(), vec![1.0, 2.0, 3.0, 6.0]).unwrap();
        let stats = field.statistics();
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(6.0));
        assert_eq!(stats.mean, Some(3.0));
        assert_eq!(stats.valid_count, 4);
    }

    #[test]
    fn test_field_length_mismatch() {
        assert!(ElevationField::new(&grid_2x2(), vec![1.0; 3]).is_err());
    }
}
