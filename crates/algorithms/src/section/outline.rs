//! Channel outline polygon

use geo_types::Coord;

use super::CrossSectionSeries;

/// Ring enclosing the channel: right banks downstream, then left banks
/// back upstream.
///
/// The ring is left open; polygon constructors close it.
pub fn river_outline(series: &CrossSectionSeries) -> Vec<Coord<f64>> {
    let sections = series.sections();
    sections
        .iter()
        .map(|s| s.right)
        .chain(sections.iter().rev().map(|s| s.left))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;
    use riverbed_core::CrossSection;

    #[test]
    fn test_outline_order() {
        let series = CrossSectionSeries::new(vec![
            CrossSection::new(0.0, coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 0.0 }),
            CrossSection::new(1.0, coord! { x: 0.0, y: 5.0 }, coord! { x: 2.0, y: 5.0 }),
        ])
        .unwrap();

        assert_eq!(
            river_outline(&series),
            vec![
                coord! { x: 2.0, y: 0.0 },
                coord! { x: 2.0, y: 5.0 },
                coord! { x: 0.0, y: 5.0 },
                coord! { x: 0.0, y: 0.0 },
            ]
        );
    }
}
