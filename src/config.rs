//! Run configuration: input and output paths plus solver settings, with Ohio defaults.

use std::{path::{Path, PathBuf}, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{render::OHIO_FIPS, redistrict::{OHIO_DISTRICTS, SolverConfig}};

/// Everything a full run needs to know. Every field has a default, so a config file may set any subset.
///
/// ```json
/// { "population": "data/ohio_counties.csv", "tolerance": 0.1, "time_limit_secs": 600 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Population CSV (`county_name,population`).
    pub population: PathBuf,
    /// Adjacency JSON.
    pub adjacency: PathBuf,
    pub num_districts: u32,
    /// Hard balance cap as a fraction of the ideal population.
    pub tolerance: Option<f64>,
    pub time_limit_secs: Option<f64>,
    /// Assignment CSV to write.
    pub output: PathBuf,
    /// SVG map to write when boundaries are available.
    pub map: PathBuf,
    /// State FIPS code used to select county boundaries.
    pub state_fips: String,
    /// Drop neighbor references and adjacency entries that match no populated county instead of halting.
    pub drop_unknown_neighbors: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population: PathBuf::from("ohio_counties.csv"),
            adjacency: PathBuf::from("adjacent_counties.json"),
            num_districts: OHIO_DISTRICTS,
            tolerance: None,
            time_limit_secs: None,
            output: PathBuf::from("district_assignments.csv"),
            map: PathBuf::from("ohio_district_map.svg"),
            state_fips: OHIO_FIPS.to_string(),
            drop_unknown_neighbors: false,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file; fields it leaves out keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("[config] Invalid config file {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Solver settings for this run.
    pub fn solver_config(&self) -> Result<SolverConfig> {
        let mut config = SolverConfig::new(self.num_districts);
        if let Some(tolerance) = self.tolerance {
            config = config.with_tolerance(tolerance);
        }
        if let Some(secs) = self.time_limit_secs {
            let limit = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("[config] Invalid time limit: {secs}"))?;
            config = config.with_time_limit(limit);
        }
        Ok(config)
    }
}
