//! GeoJSON files written and read back through the filesystem.

use geo_types::coord;
use riverbed_core::crs::CRS;
use riverbed_core::io::{
    collection_crs, collection_name, read_cross_sections, read_feature_collection, read_samples,
    write_elevation_field, write_outline,
};
use riverbed_core::{CurvilinearGrid, ElevationField, Error, SamplePoint};
use std::fs;
use tempfile::tempdir;

const SECTIONS: &str = r#"{
  "type": "FeatureCollection",
  "name": "cross_sections",
  "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::25833" } },
  "features": [
    { "type": "Feature", "properties": { "s": 2 },
      "geometry": { "type": "LineString", "coordinates": [[0.0, 10.0], [1.0, 10.0], [4.0, 10.0]] } },
    { "type": "Feature", "properties": { "s": 1 },
      "geometry": { "type": "MultiLineString", "coordinates": [[[0.0, 0.0], [4.0, 0.0]]] } }
  ]
}"#;

const POINTS: &str = r#"{
  "type": "FeatureCollection",
  "crs": { "type": "name", "properties": { "name": "EPSG:25833" } },
  "features": [
    { "type": "Feature", "properties": { "z": 5 },
      "geometry": { "type": "Point", "coordinates": [2.0, 5.0] } },
    { "type": "Feature", "properties": { "z": -1.25 },
      "geometry": { "type": "Point", "coordinates": [3.0, 7.0, 0.0] } }
  ]
}"#;

#[test]
fn reads_sections_and_samples() {
    let dir = tempdir().unwrap();
    let sections_path = dir.path().join("sections.geojson");
    let points_path = dir.path().join("points.geojson");
    fs::write(&sections_path, SECTIONS).unwrap();
    fs::write(&points_path, POINTS).unwrap();

    let (sections, sections_crs) = read_cross_sections(&sections_path, "s").unwrap();
    let (samples, points_crs) = read_samples(&points_path, "z").unwrap();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].order, 2.0);
    assert_eq!(sections[0].right, coord! { x: 4.0, y: 10.0 });
    assert_eq!(sections[1].left, coord! { x: 0.0, y: 0.0 });
    assert_eq!(
        samples,
        vec![SamplePoint::new(2.0, 5.0, 5.0), SamplePoint::new(3.0, 7.0, -1.25)]
    );

    let (a, b) = (sections_crs.unwrap(), points_crs.unwrap());
    assert!(a.is_equivalent(&b));
    assert_eq!(a.epsg(), Some(25833));
}

#[test]
fn missing_z_field_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("points.geojson");
    fs::write(&path, POINTS).unwrap();

    assert!(matches!(
        read_samples(&path, "depth"),
        Err(Error::MissingProperty { feature: 0, .. })
    ));
}

#[test]
fn malformed_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.geojson");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(read_samples(&path, "z"), Err(Error::Json(_))));
    assert!(matches!(
        read_samples(dir.path().join("absent.geojson"), "z"),
        Err(Error::Io(_))
    ));
}

#[test]
fn writes_elevation_points_row_major() {
    let grid = CurvilinearGrid::from_vecs(
        vec![0.0, 1.0, 0.0, 1.0],
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.0, 0.0, 1.0, 1.0],
        2,
        2,
        1.0,
    )
    .unwrap();
    let field = ElevationField::new(&grid, vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("result.geojson");
    write_elevation_field(&field, &path, Some(&CRS::from_epsg(25833))).unwrap();

    let fc = read_feature_collection(&path).unwrap();
    assert_eq!(collection_name(&fc), Some("interpolated_points"));
    assert_eq!(collection_crs(&fc).as_ref().and_then(CRS::epsg), Some(25833));
    let z: Vec<f64> = fc
        .features
        .iter()
        .filter_map(|f| f.property("z").and_then(serde_json::Value::as_f64))
        .collect();
    assert_eq!(z, vec![1.0, 2.0, 3.0, 4.0]);

    let (samples, crs) = read_samples(&path, "z").unwrap();
    assert_eq!(samples[3], SamplePoint::new(1.0, 1.0, 4.0));
    assert!(crs.unwrap().is_equivalent(&CRS::from_epsg(25833)));
}

#[test]
fn writes_outline_polygon() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("outline.geojson");
    let ring = vec![
        coord! { x: 4.0, y: 0.0 },
        coord! { x: 4.0, y: 10.0 },
        coord! { x: 0.0, y: 10.0 },
        coord! { x: 0.0, y: 0.0 },
    ];
    write_outline(ring, &path, None).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["name"], "river_outline");
    assert!(raw.get("crs").is_none());
    assert_eq!(raw["features"][0]["geometry"]["type"], "Polygon");
    let ring = raw["features"][0]["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);
}
