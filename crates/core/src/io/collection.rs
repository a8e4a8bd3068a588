//! GeoJSON feature collections on disk
//!
//! Decoding and encoding are left to the `geojson` crate. The collection
//! `name` and the legacy named `crs` written by desktop GIS packages are
//! not part of RFC 7946, so they travel as foreign members.

use geojson::{FeatureCollection, GeoJson, JsonObject, JsonValue};
use serde_json::json;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::crs::CRS;
use crate::error::{Error, Result};

/// Read a GeoJSON FeatureCollection from a file
pub fn read_feature_collection<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let reader = BufReader::new(File::open(path)?);
    let value: JsonValue = serde_json::from_reader(reader)?;
    parse_feature_collection(value)
}

/// Decode a parsed JSON document that must be a FeatureCollection
pub fn parse_feature_collection(value: JsonValue) -> Result<FeatureCollection> {
    match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        GeoJson::Feature(_) => Err(Error::InvalidGeoJson(
            "expected a FeatureCollection, found a Feature".into(),
        )),
        GeoJson::Geometry(_) => Err(Error::InvalidGeoJson(
            "expected a FeatureCollection, found a Geometry".into(),
        )),
    }
}

/// Write a FeatureCollection to a GeoJSON file
pub fn write_feature_collection<P: AsRef<Path>>(fc: &FeatureCollection, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, fc)?;
    writer.flush()?;
    Ok(())
}

/// Collection with a `name` member and, when known, a named `crs`
pub fn named_collection(
    name: &str,
    crs: Option<&CRS>,
    features: Vec<geojson::Feature>,
) -> FeatureCollection {
    let mut members = JsonObject::new();
    members.insert("name".to_string(), json!(name));
    if let Some(crs) = crs {
        members.insert(
            "crs".to_string(),
            json!({ "type": "name", "properties": { "name": crs.name() } }),
        );
    }
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(members),
    }
}

/// The collection's `name` member
pub fn collection_name(fc: &FeatureCollection) -> Option<&str> {
    foreign_member(fc, "name").and_then(JsonValue::as_str)
}

/// The CRS declared by the collection's `crs` member
pub fn collection_crs(fc: &FeatureCollection) -> Option<CRS> {
    foreign_member(fc, "crs")?
        .pointer("/properties/name")?
        .as_str()
        .map(CRS::from_name)
}

fn foreign_member<'a>(fc: &'a FeatureCollection, key: &str) -> Option<&'a JsonValue> {
    fc.foreign_members.as_ref()?.get(key)
}
