//! Coordinate Reference System handling
//!
//! Inputs carry the CRS they were written in as a plain name (the GeoJSON
//! `crs.properties.name` member). Nothing is reprojected: the name is only
//! compared so that sections and samples are known to share one frame.

use std::fmt;

use crate::error::{Error, Result};

/// Coordinate Reference System representation
#[derive(Debug, Clone, PartialEq)]
pub struct CRS {
    /// Name as declared by the source file
    name: String,
    /// EPSG code if one could be read from the name
    epsg: Option<u32>,
}

impl CRS {
    /// Create a CRS from a declared name such as `EPSG:25832` or
    /// `urn:ogc:def:crs:EPSG::25832`
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let epsg = parse_epsg(&name);
        Self { name, epsg }
    }

    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            name: format!("urn:ogc:def:crs:EPSG::{}", code),
            epsg: Some(code),
        }
    }

    /// Declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Check if two CRS are equivalent
    pub fn is_equivalent(&self, other: &CRS) -> bool {
        if let (Some(a), Some(b)) = (self.epsg, other.epsg) {
            return a == b;
        }
        self.name == other.name
    }

    /// Get a string identifier for this CRS
    pub fn identifier(&self) -> String {
        match self.epsg {
            Some(code) => format!("EPSG:{}", code),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for CRS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Outcome of comparing the CRS declared by two inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsCheck {
    /// Both inputs declare equivalent systems
    Match,
    /// Only one of the inputs declares a system
    Partial,
    /// Neither input declares a system
    Undeclared,
}

/// Compare the CRS of two inputs that are about to be combined.
///
/// Two declared but different systems are an error. A missing declaration
/// on one side is reported as [`CrsCheck::Partial`] so the caller can warn.
pub fn check_crs(a: Option<&CRS>, b: Option<&CRS>) -> Result<CrsCheck> {
    match (a, b) {
        (Some(a), Some(b)) if a.is_equivalent(b) => Ok(CrsCheck::Match),
        (Some(a), Some(b)) => Err(Error::CrsMismatch(a.identifier(), b.identifier())),
        (Some(_), None) | (None, Some(_)) => Ok(CrsCheck::Partial),
        (None, None) => Ok(CrsCheck::Undeclared),
    }
}

fn parse_epsg(name: &str) -> Option<u32> {
    let upper = name.to_ascii_uppercase();
    let pos = upper.rfind("EPSG")?;
    // Versioned URNs put the code last: urn:ogc:def:crs:EPSG:6.3:3006
    upper[pos + 4..]
        .rsplit(':')
        .next()
        .and_then(|code| code.trim().parse().ok())
}
