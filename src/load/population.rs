use std::path::Path;

use anyhow::{Context, Result};

use crate::{io, types::CountyRecord};

/// Load the population table (`county_name,population`) from a CSV file.
pub fn load_population(path: &Path) -> Result<Vec<CountyRecord>> {
    let df = io::csv::read_csv(path)?;
    io::csv::read_population_records(df)
        .with_context(|| format!("[load::population] Invalid population data in {}", path.display()))
}

/// Load the population table from CSV text.
pub fn load_population_str(csv: &str) -> Result<Vec<CountyRecord>> {
    io::csv::read_population_records(io::csv::read_csv_string(csv)?)
}
