//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::types::DistrictAssignment;

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write a DataFrame to a CSV string.
#[cfg(test)]
pub(crate) fn write_csv_string(df: &mut DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(df)
        .with_context(|| "[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .with_context(|| "[io::csv::write] CSV output is not valid UTF-8")
}

/// Build the two-column `county_name,assigned_district` frame, one row per assignment.
fn assignments_frame(assignments: &[DistrictAssignment]) -> Result<DataFrame> {
    let (names, districts) = assignments.iter()
        .map(|a| (a.county_name.to_string(), a.assigned_district))
        .unzip::<_, _, Vec<_>, Vec<_>>();

    Ok(DataFrame::new(vec![
        Series::new("county_name".into(), names).into(),
        Series::new("assigned_district".into(), districts).into(),
    ])?)
}

/// Write district assignments to a CSV file.
pub(crate) fn write_assignments(assignments: &[DistrictAssignment], path: &Path) -> Result<()> {
    write_csv(&mut assignments_frame(assignments)?, path)
}

/// Write district assignments to a CSV string.
#[cfg(test)]
pub(crate) fn write_assignments_string(assignments: &[DistrictAssignment]) -> Result<String> {
    write_csv_string(&mut assignments_frame(assignments)?)
}
