//! CSV reading operations.

use std::{collections::HashSet, fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result, bail, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReader, DataType}};

use crate::types::{CountyName, CountyRecord, DistrictAssignment};

/// Reads a CSV file from `path` into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads a CSV from a string.
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    CsvReader::new(Cursor::new(csv.as_bytes()))
        .finish()
        .with_context(|| "[io::csv::read] Failed to read CSV from string")
}

/// Largest float that still holds every smaller integer exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Population cells as `Ok(count)`, `Err(raw text)` when not a non-negative integer, or `None` when missing.
fn population_values(df: &DataFrame) -> Result<Vec<Option<Result<u64, String>>>> {
    let column = df.column("population")
        .context("[io::csv::read] Population CSV is missing the 'population' column")?;

    // integer columns are read exactly; floats only pass when they hold a whole number
    if column.dtype().is_integer() {
        Ok(column.cast(&DataType::Int64)?.i64()?.into_iter()
            .map(|p| p.map(|p| u64::try_from(p).map_err(|_| p.to_string())))
            .collect())
    } else {
        Ok(column.cast(&DataType::Float64)?.f64()?.into_iter()
            .map(|p| p.map(|p| match p {
                p if p.is_finite() && p >= 0.0 && p.fract() == 0.0 && p <= MAX_EXACT_FLOAT => Ok(p as u64),
                p => Err(p.to_string()),
            }))
            .collect())
    }
}

/// Read population records from a DataFrame with `county_name` and `population` columns.
///
/// Rows with a blank name, a missing or non-integral population, or a repeated county are rejected;
/// row numbers in errors are 1-based data rows (the header is not counted).
pub(crate) fn read_population_records(df: DataFrame) -> Result<Vec<CountyRecord>> {
    let names = df.column("county_name")
        .context("[io::csv::read] Population CSV is missing the 'county_name' column")?
        .cast(&DataType::String)?;
    let populations = population_values(&df)?;

    let mut seen = HashSet::with_capacity(df.height());
    names.str()?.into_iter()
        .zip(populations)
        .enumerate()
        .map(|(i, (name, population))| {
            let row = i + 1;
            let county_name = match name.map(CountyName::new) {
                Some(name) if !name.is_empty() => name,
                _ => bail!("[io::csv::read] Row {row}: missing county_name"),
            };
            let population = match population {
                Some(Ok(p)) => p,
                Some(Err(raw)) => bail!("[io::csv::read] Row {row}: population {raw} for '{county_name}' is not a non-negative integer"),
                None => bail!("[io::csv::read] Row {row}: missing or invalid population for '{county_name}'"),
            };
            ensure!(seen.insert(county_name.clone()), "[io::csv::read] Row {row}: duplicate county '{county_name}'");
            Ok(CountyRecord { county_name, population })
        })
        .collect()
}

/// Read district assignments from a DataFrame with `county_name` and `assigned_district` columns.
pub(crate) fn read_assignment_records(df: DataFrame) -> Result<Vec<DistrictAssignment>> {
    let names = df.column("county_name")
        .context("[io::csv::read] Assignment CSV is missing the 'county_name' column")?
        .cast(&DataType::String)?;
    let districts = df.column("assigned_district")
        .context("[io::csv::read] Assignment CSV is missing the 'assigned_district' column")?
        .cast(&DataType::Int64)?;

    names.str()?.into_iter()
        .zip(districts.i64()?.into_iter())
        .enumerate()
        .map(|(i, (name, district))| {
            let row = i + 1;
            let county_name = match name.map(CountyName::new) {
                Some(name) if !name.is_empty() => name,
                _ => bail!("[io::csv::read] Row {row}: missing county_name"),
            };
            let assigned_district = match district {
                Some(d) if (0..=u32::MAX as i64).contains(&d) => d as u32,
                _ => bail!("[io::csv::read] Row {row}: invalid assigned_district for '{county_name}'"),
            };
            Ok(DistrictAssignment { county_name, assigned_district })
        })
        .collect()
}
