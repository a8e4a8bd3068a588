//! Ordered cross-section series with derived stations
//!
//! Sections are sorted by their `order` key and each one is given a
//! station: the cumulative distance between consecutive section midpoints,
//! starting at 0 for the first section.

use riverbed_core::section::distance;
use riverbed_core::{CrossSection, Error, Result};

/// Cross-sections sorted along the river with stations assigned.
///
/// Invariants: at least two sections, the first station is 0 and stations
/// are strictly increasing.
#[derive(Debug, Clone)]
pub struct CrossSectionSeries {
    sections: Vec<CrossSection>,
}

impl CrossSectionSeries {
    /// Sort `sections` by `order` and derive their stations.
    ///
    /// The sort is stable, so sections sharing an `order` keep their input
    /// order.
    ///
    /// # Errors
    /// `DegenerateInput` for fewer than two sections, a non-numeric order,
    /// or two consecutive sections whose midpoints coincide.
    pub fn new(mut sections: Vec<CrossSection>) -> Result<Self> {
        if sections.len() < 2 {
            return Err(Error::DegenerateInput(format!(
                "at least 2 cross-sections are required, got {}",
                sections.len()
            )));
        }
        if let Some(bad) = sections.iter().position(|s| s.order.is_nan()) {
            return Err(Error::DegenerateInput(format!(
                "cross-section {} has no usable order value",
                bad
            )));
        }

        sections.sort_by(|a, b| a.order.total_cmp(&b.order));

        sections[0].station = 0.0;
        for i in 1..sections.len() {
            let step = distance(sections[i - 1].midpoint(), sections[i].midpoint());
            if !(step > 0.0 && step.is_finite()) {
                return Err(Error::DegenerateInput(format!(
                    "cross-sections with order {} and {} do not advance along the river",
                    sections[i - 1].order,
                    sections[i].order
                )));
            }
            sections[i].station = sections[i - 1].station + step;
        }

        Ok(Self { sections })
    }

    /// Sections in station order
    pub fn sections(&self) -> &[CrossSection] {
        &self.sections
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; a series holds at least two sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Station of the last section
    pub fn total_length(&self) -> f64 {
        self.sections.last().map_or(0.0, |s| s.station)
    }

    /// Mean bank-to-bank width over all sections
    pub fn average_width(&self) -> f64 {
        let sum: f64 = self.sections.iter().map(CrossSection::width).sum();
        sum / self.sections.len() as f64
    }

    /// Consecutive section pairs in station order
    pub fn pairs(&self) -> impl Iterator<Item = (&CrossSection, &CrossSection)> {
        self.sections.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// The consecutive pair whose stations enclose `station`.
    ///
    /// Pairs are scanned in station order and the first match wins. A
    /// station past the end (floating-point overshoot) falls back to the
    /// last pair.
    pub fn bracket(&self, station: f64) -> (&CrossSection, &CrossSection) {
        let n = self.sections.len();
        self.pairs()
            .find(|(a, b)| a.station <= station && station <= b.station)
            .unwrap_or((&self.sections[n - 2], &self.sections[n - 1]))
    }
}
