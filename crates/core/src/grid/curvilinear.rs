//! Curvilinear grid type

use crate::error::{Error, Result};
use geo_types::Coord;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// A structured grid that follows the river channel.
///
/// Rows advance along the river and columns advance across it, from the
/// left bank (column 0) to the right bank (column `cols - 1`). Every cell
/// holds its world coordinate and the station of its row.
///
/// # Example
///
/// ```ignore
/// use riverbed_core::CurvilinearGrid;
///
/// let grid = CurvilinearGrid::from_vecs(xs, ys, ss, 3, 2, 1.0)?;
/// let p = grid.point(1, 0)?;
/// ```
#[derive(Debug, Clone)]
pub struct CurvilinearGrid {
    /// World x of each cell, row-major (row, col)
    xs: Array2<f64>,
    /// World y of each cell
    ys: Array2<f64>,
    /// Station of each cell (constant along a row)
    ss: Array2<f64>,
    /// Nominal spacing the grid was built with
    dx: f64,
}

impl CurvilinearGrid {
    /// Create a grid from row-major coordinate and station buffers
    pub fn from_vecs(
        xs: Vec<f64>,
        ys: Vec<f64>,
        ss: Vec<f64>,
        rows: usize,
        cols: usize,
        dx: f64,
    ) -> Result<Self> {
        let n = rows * cols;
        if xs.len() != n || ys.len() != n || ss.len() != n {
            return Err(Error::Other(format!(
                "grid buffers do not match {}x{}: xs={}, ys={}, ss={}",
                rows,
                cols,
                xs.len(),
                ys.len(),
                ss.len()
            )));
        }

        let shape = (rows, cols);
        let to_array =
            |v: Vec<f64>| Array2::from_shape_vec(shape, v).map_err(|e| Error::Other(e.to_string()));

        Ok(Self {
            xs: to_array(xs)?,
            ys: to_array(ys)?,
            ss: to_array(ss)?,
            dx,
        })
    }

    // Dimensions

    /// Number of rows (along the river)
    pub fn rows(&self) -> usize {
        self.xs.nrows()
    }

    /// Number of columns (across the channel)
    pub fn cols(&self) -> usize {
        self.xs.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.xs.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Nominal grid spacing
    pub fn dx(&self) -> f64 {
        self.dx
    }

    // Data access

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    /// World coordinate of cell (row, col)
    pub fn point(&self, row: usize, col: usize) -> Result<Coord<f64>> {
        self.check(row, col)?;
        Ok(Coord {
            x: self.xs[(row, col)],
            y: self.ys[(row, col)],
        })
    }

    /// Station of cell (row, col)
    pub fn station(&self, row: usize, col: usize) -> Result<f64> {
        self.check(row, col)?;
        Ok(self.ss[(row, col)])
    }

    /// Stations of every row, read from column 0
    pub fn row_stations(&self) -> ArrayView1<'_, f64> {
        self.ss.column(0)
    }

    /// View of the x coordinates
    pub fn xs(&self) -> ArrayView2<'_, f64> {
        self.xs.view()
    }

    /// View of the y coordinates
    pub fn ys(&self) -> ArrayView2<'_, f64> {
        self.ys.view()
    }

    /// View of the cell stations
    pub fn stations(&self) -> ArrayView2<'_, f64> {
        self.ss.view()
    }

    /// Iterate over cells in row-major order as `(row, col, point)`
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Coord<f64>)> + '_ {
        self.xs
            .indexed_iter()
            .zip(self.ys.iter())
            .map(|(((row, col), &x), &y)| (row, col, Coord { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> CurvilinearGrid {
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

    #[test]
    fn test_grid_creation() {
        let grid = small_grid();
        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.point(2, 1).unwrap(), Coord { x: 1.0, y: 2.0 });
        assert_eq!(grid.station(1, 0).unwrap(), 1.0);
        assert_eq!(grid.row_stations().to_vec(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_grid_bounds() {
        let grid = small_grid();
        assert!(matches!(
            grid.point(3, 0),
            Err(Error::IndexOutOfBounds { row: 3, .. })
        ));
    }

    #[test]
    fn test_grid_shape_mismatch() {
        let result = CurvilinearGrid::from_vecs(vec![0.0; 5], vec![0.0; 6], vec![0.0; 6], 3, 2, 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_cells_row_major() {
        let grid = small_grid();
        let order: Vec<(usize, usize)> = grid.cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }
}
