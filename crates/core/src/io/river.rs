//! Reading river inputs from, and writing results to, GeoJSON

use geo_types::{Coord, Geometry, LineString, Point, Polygon};
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use std::path::Path;

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::grid::ElevationField;
use crate::io::collection::{
    collection_crs, named_collection, read_feature_collection, write_feature_collection,
};
use crate::sample::SamplePoint;
use crate::section::CrossSection;

/// Read cross-sections from a GeoJSON file.
///
/// Each feature is a LineString (or a MultiLineString, whose first part is
/// used) drawn from the left bank to the right bank. Only the first and
/// last vertices matter. `order_field` names the numeric property that
/// orders the sections along the river.
pub fn read_cross_sections<P: AsRef<Path>>(
    path: P,
    order_field: &str,
) -> Result<(Vec<CrossSection>, Option<CRS>)> {
    let fc = read_feature_collection(path)?;
    let sections = cross_sections_from_features(&fc, order_field)?;
    Ok((sections, collection_crs(&fc)))
}

/// Convert decoded features into cross-sections
pub fn cross_sections_from_features(
    fc: &FeatureCollection,
    order_field: &str,
) -> Result<Vec<CrossSection>> {
    fc.features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let geometry = feature_geometry(feature, index)?;
            let line = match &geometry {
                Geometry::LineString(line) => line,
                Geometry::MultiLineString(multi) => multi.0.first().ok_or_else(|| {
                    Error::InvalidGeoJson(format!("feature {} has an empty MultiLineString", index))
                })?,
                other => return Err(Error::UnsupportedGeometry(geometry_name(other))),
            };
            let (left, right) = endpoints(line).ok_or_else(|| {
                Error::InvalidGeoJson(format!("feature {} has an empty line", index))
            })?;
            let order = numeric_property(feature, index, order_field)?;
            Ok(CrossSection::new(order, left, right))
        })
        .collect()
}

/// Read elevation samples from a GeoJSON file of Point features
pub fn read_samples<P: AsRef<Path>>(
    path: P,
    z_field: &str,
) -> Result<(Vec<SamplePoint>, Option<CRS>)> {
    let fc = read_feature_collection(path)?;
    let samples = samples_from_features(&fc, z_field)?;
    Ok((samples, collection_crs(&fc)))
}

/// Convert decoded Point features into samples
pub fn samples_from_features(fc: &FeatureCollection, z_field: &str) -> Result<Vec<SamplePoint>> {
    fc.features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let point = match feature_geometry(feature, index)? {
                Geometry::Point(p) => p,
                other => return Err(Error::UnsupportedGeometry(geometry_name(&other))),
            };
            let z = numeric_property(feature, index, z_field)?;
            Ok(SamplePoint::new(point.x(), point.y(), z))
        })
        .collect()
}

/// Write the channel outline polygon
pub fn write_outline<P: AsRef<Path>>(
    ring: Vec<Coord<f64>>,
    path: P,
    crs: Option<&CRS>,
) -> Result<()> {
    let polygon = Polygon::new(LineString(ring), Vec::new());
    let feature = new_feature(geojson::Value::from(&polygon), None);
    write_feature_collection(&named_collection("river_outline", crs, vec![feature]), path)
}

/// Write one Point feature per grid cell with its elevation in `z`
pub fn write_elevation_field<P: AsRef<Path>>(
    field: &ElevationField,
    path: P,
    crs: Option<&CRS>,
) -> Result<()> {
    write_feature_collection(&elevation_features(field, crs), path)
}

/// Row-major Point features for an elevation field
pub fn elevation_features(field: &ElevationField, crs: Option<&CRS>) -> FeatureCollection {
    let features = field
        .points()
        .map(|(x, y, z)| {
            let mut properties = JsonObject::new();
            properties.insert("z".to_string(), JsonValue::from(z));
            new_feature(geojson::Value::from(&Point::new(x, y)), Some(properties))
        })
        .collect();
    named_collection("interpolated_points", crs, features)
}

fn new_feature(value: geojson::Value, properties: Option<JsonObject>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    }
}

fn feature_geometry(feature: &Feature, index: usize) -> Result<Geometry<f64>> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| Error::InvalidGeoJson(format!("feature {} has no geometry", index)))?;
    Ok(Geometry::try_from(&geometry.value)?)
}

fn numeric_property(feature: &Feature, index: usize, name: &str) -> Result<f64> {
    feature
        .property(name)
        .and_then(JsonValue::as_f64)
        .ok_or_else(|| Error::MissingProperty {
            feature: index,
            name: name.to_string(),
        })
}

fn endpoints(line: &LineString<f64>) -> Option<(Coord<f64>, Coord<f64>)> {
    Some((*line.0.first()?, *line.0.last()?))
}

fn geometry_name(geometry: &Geometry<f64>) -> String {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
    .to_string()
}
