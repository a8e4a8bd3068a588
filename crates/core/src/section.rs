//! Cross-section records

use geo_types::Coord;

/// A line across the channel marking its left and right banks.
///
/// `order` is the user supplied sort key. `station` is the arc-length
/// position along the centerline and is derived when the sections are
/// assembled into a series, so loaders leave it at `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    pub order: f64,
    pub station: f64,
    pub left: Coord<f64>,
    pub right: Coord<f64>,
}

impl CrossSection {
    /// Create a section with an underived station
    pub fn new(order: f64, left: Coord<f64>, right: Coord<f64>) -> Self {
        Self {
            order,
            station: 0.0,
            left,
            right,
        }
    }

    /// Centerline point of the section
    #[inline]
    pub fn midpoint(&self) -> Coord<f64> {
        (self.left + self.right) * 0.5
    }

    /// Bank-to-bank distance
    #[inline]
    pub fn width(&self) -> f64 {
        distance(self.left, self.right)
    }

    /// Point at fraction `t` of the way from the left bank to the right bank
    #[inline]
    pub fn across(&self, t: f64) -> Coord<f64> {
        self.left + (self.right - self.left) * t
    }
}

/// Euclidean distance between two coordinates
#[inline]
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d = a - b;
    d.x.hypot(d.y)
}
