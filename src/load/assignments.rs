use std::path::Path;

use anyhow::{Context, Result};

use crate::{io, types::DistrictAssignment};

/// Load a `county_name,assigned_district` table written by a previous run.
pub fn load_assignments(path: &Path) -> Result<Vec<DistrictAssignment>> {
    let df = io::csv::read_csv(path)?;
    io::csv::read_assignment_records(df)
        .with_context(|| format!("[load::assignments] Invalid assignment data in {}", path.display()))
}

/// Write district assignments as a `county_name,assigned_district` CSV file.
pub fn save_assignments(assignments: &[DistrictAssignment], path: &Path) -> Result<()> {
    io::csv::write_assignments(assignments, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_assignments_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("district_assignments.csv");
        let assignments = vec![DistrictAssignment::new("adams county", 4), DistrictAssignment::new("van wert county", 15)];

        save_assignments(&assignments, &path).unwrap();
        assert_eq!(load_assignments(&path).unwrap(), assignments);
    }

    #[test]
    fn negative_district_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"county_name,assigned_district\nadams county,-1\n").unwrap();
        assert!(load_assignments(file.path()).is_err());
    }
}
