use std::collections::HashSet;

use crate::types::{CountyName, MergedCounty};

use super::{SolverConfig, ValidationError};

/// Reject inputs that would build a wrong or meaningless model.
pub(crate) fn validate(counties: &[MergedCounty], config: &SolverConfig) -> Result<(), ValidationError> {
    if counties.is_empty() { return Err(ValidationError::NoCounties) }
    if config.num_districts == 0 { return Err(ValidationError::NoDistricts) }
    if config.num_districts as usize > counties.len() {
        return Err(ValidationError::TooManyDistricts { num_districts: config.num_districts, num_counties: counties.len() });
    }
    if let Some(tolerance) = config.tolerance {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ValidationError::InvalidTolerance { tolerance });
        }
    }

    let mut known: HashSet<&CountyName> = HashSet::with_capacity(counties.len());
    for county in counties {
        if !known.insert(&county.county_name) {
            return Err(ValidationError::DuplicateCounty { county: county.county_name.clone() });
        }
    }

    for county in counties {
        let neighbors = county.neighbors.as_ref()
            .ok_or_else(|| ValidationError::MissingAdjacency { county: county.county_name.clone() })?;
        if let Some(neighbor) = neighbors.iter().find(|n| !known.contains(n)) {
            return Err(ValidationError::UnknownNeighbor { county: county.county_name.clone(), neighbor: neighbor.clone() });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Vec<MergedCounty> {
        vec![
            MergedCounty::new("a", 100, ["b", "d"]),
            MergedCounty::new("b", 100, ["a", "c"]),
            MergedCounty::new("c", 100, ["b", "d"]),
            MergedCounty::new("d", 100, ["c", "a"]),
        ]
    }

    #[test]
    fn accepts_a_consistent_table() {
        assert_eq!(validate(&ring(), &SolverConfig::new(2)), Ok(()));
    }

    #[test]
    fn rejects_empty_tables_and_zero_districts() {
        assert_eq!(validate(&[], &SolverConfig::new(2)), Err(ValidationError::NoCounties));
        assert_eq!(validate(&ring(), &SolverConfig::new(0)), Err(ValidationError::NoDistricts));
    }

    #[test]
    fn rejects_more_districts_than_counties() {
        assert_eq!(
            validate(&ring(), &SolverConfig::new(5)),
            Err(ValidationError::TooManyDistricts { num_districts: 5, num_counties: 4 }),
        );
    }

    #[test]
    fn rejects_missing_adjacency() {
        let mut counties = ring();
        counties[2].neighbors = None;
        assert_eq!(
            validate(&counties, &SolverConfig::new(2)),
            Err(ValidationError::MissingAdjacency { county: "c".into() }),
        );
    }

    #[test]
    fn rejects_unresolved_neighbors() {
        let mut counties = ring();
        counties[0] = MergedCounty::new("a", 100, ["b", "d", "wayne county, wv"]);
        assert_eq!(
            validate(&counties, &SolverConfig::new(2)),
            Err(ValidationError::UnknownNeighbor { county: "a".into(), neighbor: "wayne county, wv".into() }),
        );
    }

    #[test]
    fn rejects_duplicates() {
        let mut counties = ring();
        counties.push(MergedCounty::new("A", 1, ["b"]));
        assert_eq!(
            validate(&counties, &SolverConfig::new(2)),
            Err(ValidationError::DuplicateCounty { county: "a".into() }),
        );
    }

    #[test]
    fn rejects_negative_tolerance() {
        let config = SolverConfig::new(2).with_tolerance(-0.1);
        assert!(matches!(validate(&ring(), &config), Err(ValidationError::InvalidTolerance { .. })));
    }
}
