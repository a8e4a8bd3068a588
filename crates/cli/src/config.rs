//! Parameter file for a full run

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use riverbed_algorithms::grid::GridParams;
use riverbed_algorithms::interpolation::IdwParams;
use riverbed_algorithms::pipeline::Pipeline;

/// Contents of `parameters.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Parameters {
    pub cross_section_file_name: PathBuf,
    #[serde(default = "default_order_field")]
    pub cross_section_order_field_name: String,
    pub points_file_name: PathBuf,
    #[serde(default = "default_z_field")]
    pub points_z_field_name: String,
    pub dx: f64,
    #[serde(default = "default_anisotropy")]
    pub anisotropy: f64,
    #[serde(default = "default_num_neighbours")]
    pub num_neighbours: usize,
    #[serde(default = "default_power")]
    pub power: f64,
    #[serde(default)]
    pub river_outline_file_name: Option<PathBuf>,
    pub results_file_name: PathBuf,
}

fn default_order_field() -> String {
    "s".to_string()
}

fn default_z_field() -> String {
    "z".to_string()
}

fn default_anisotropy() -> f64 {
    20.0
}

fn default_num_neighbours() -> usize {
    10
}

fn default_power() -> f64 {
    1.0
}

impl Parameters {
    /// Load parameters from a JSON file.
    ///
    /// Relative file names inside the file are resolved against the
    /// directory holding it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameters from {}", path.display()))?;
        let mut params: Parameters = serde_json::from_str(&content)
            .with_context(|| format!("Invalid parameter file {}", path.display()))?;

        if let Some(base) = path.parent() {
            params.resolve_paths(base);
        }
        Ok(params)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.cross_section_file_name);
        resolve(&mut self.points_file_name);
        resolve(&mut self.results_file_name);
        if let Some(outline) = self.river_outline_file_name.as_mut() {
            resolve(outline);
        }
    }

    /// Pipeline configured from these parameters
    pub fn pipeline(&self) -> Pipeline {
        Pipeline {
            grid: GridParams { dx: self.dx },
            idw: IdwParams {
                anisotropy: self.anisotropy,
                neighbour_cap: self.num_neighbours,
                power: self.power,
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_and_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parameters.json");
        fs::write(
            &path,
            r#"{
                "cross_section_file_name": "sections.geojson",
                "points_file_name": "/data/points.geojson",
                "dx": 2.5,
                "results_file_name": "out/result.geojson"
            }"#,
        )
        .unwrap();

        let params = Parameters::from_file(&path).unwrap();
        assert_eq!(params.cross_section_order_field_name, "s");
        assert_eq!(params.points_z_field_name, "z");
        assert_eq!(params.anisotropy, 20.0);
        assert_eq!(params.num_neighbours, 10);
        assert_eq!(params.power, 1.0);
        assert!(params.river_outline_file_name.is_none());
        assert_eq!(params.cross_section_file_name, dir.path().join("sections.geojson"));
        assert_eq!(params.points_file_name, PathBuf::from("/data/points.geojson"));

        let pipeline = params.pipeline();
        assert_eq!(pipeline.grid.dx, 2.5);
        assert_eq!(pipeline.idw.neighbour_cap, 10);
    }

    #[test]
    fn test_missing_required_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parameters.json");
        fs::write(&path, r#"{ "dx": 1.0 }"#).unwrap();
        assert!(Parameters::from_file(&path).is_err());
    }
}
