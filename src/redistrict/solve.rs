use crate::{graph::CountyGraph, types::{CountyName, DistrictAssignment, MergedCounty}};

use super::{
    Districting, SolveError, SolverConfig,
    extract::extract_districts,
    model::Formulation,
    validate::validate,
};

/// Assign every county to one of `config.num_districts` districts, minimising the summed
/// deviation of district populations from the ideal.
///
/// Input is validated before any model is built. With a time limit the solver stops when it
/// expires and `SolveError::TimedOut` is returned, even if it holds a not-yet-optimal incumbent.
pub fn solve(counties: &[MergedCounty], config: &SolverConfig) -> Result<Districting, SolveError> {
    validate(counties, config)?;

    let graph = CountyGraph::from_counties(counties);
    let mut formulation = Formulation::new(&graph, config.num_districts, config.tolerance);
    if let Some(limit) = config.time_limit {
        formulation = formulation.with_time_limit(limit);
    }
    log::debug!(
        "[redistrict] model: {} binaries, {} constraints, {} adjacent pairs, ideal {:.1}",
        formulation.binary_count(), formulation.constraint_count(), graph.edge_count() / 2, formulation.ideal(),
    );

    let raw = formulation.solve()?;

    let names: Vec<CountyName> = counties.iter().map(|c| c.county_name.clone()).collect();
    let districts = extract_districts(&names, &raw.assignment)?;

    let assignments = names.into_iter().zip(districts)
        .map(|(name, district)| DistrictAssignment::new(name, district))
        .collect();
    let populations: Vec<u64> = counties.iter().map(|c| c.population).collect();

    Ok(Districting::new(assignments, &populations, config.num_districts, raw.objective()))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::redistrict::{SolveStatus, ValidationError};

    fn county(name: &str, population: u64, neighbors: &[&str]) -> MergedCounty {
        MergedCounty::new(name, population, neighbors.iter().copied())
    }

    fn two_pairs() -> Vec<MergedCounty> {
        vec![
            county("a", 100, &["b"]),
            county("b", 100, &["a"]),
            county("c", 100, &["d"]),
            county("d", 100, &["c"]),
        ]
    }

    fn ring() -> Vec<MergedCounty> {
        vec![
            county("a", 100, &["b", "d"]),
            county("b", 100, &["a", "c"]),
            county("c", 100, &["b", "d"]),
            county("d", 100, &["c", "a"]),
        ]
    }

    fn district_of(districting: &Districting, name: &str) -> u32 {
        districting.assignments.iter().find(|a| a.county_name.as_str() == name).unwrap().assigned_district
    }

    #[test]
    fn balances_two_components_exactly() {
        let districting = solve(&two_pairs(), &SolverConfig::new(2)).unwrap();

        assert_eq!(districting.status, SolveStatus::Optimal);
        assert!(districting.objective.abs() < 1e-6);
        assert_eq!(districting.district_populations, vec![200, 200]);
        assert_eq!(district_of(&districting, "a"), district_of(&districting, "b"));
        assert_eq!(district_of(&districting, "c"), district_of(&districting, "d"));
        assert_ne!(district_of(&districting, "a"), district_of(&districting, "c"));
    }

    #[test]
    fn connected_ring_collapses_into_one_district() {
        let districting = solve(&ring(), &SolverConfig::new(2)).unwrap();

        assert!((districting.objective - 400.0).abs() < 1e-6);
        let mut populations = districting.district_populations.clone();
        populations.sort_unstable();
        assert_eq!(populations, vec![0, 400]);
    }

    #[test]
    fn assignments_follow_input_order() {
        let counties = two_pairs();
        let districting = solve(&counties, &SolverConfig::new(2)).unwrap();

        let names: Vec<&str> = districting.assignments.iter().map(|a| a.county_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert!(districting.assignments.iter().all(|a| a.assigned_district < 2));
    }

    #[test]
    fn tolerance_makes_ring_infeasible() {
        let result = solve(&ring(), &SolverConfig::new(2).with_tolerance(0.1));
        let err = result.unwrap_err();
        assert_eq!(err, SolveError::Infeasible);
        assert_eq!(err.status(), SolveStatus::Infeasible);
    }

    #[test]
    fn more_districts_than_counties_is_rejected() {
        let err = solve(&two_pairs(), &SolverConfig::new(5)).unwrap_err();
        assert_eq!(err, SolveError::Validation(ValidationError::TooManyDistricts { num_districts: 5, num_counties: 4 }));
        assert_eq!(err.status(), SolveStatus::NotSolved);
    }

    fn isolated_counties(n: u64) -> Vec<MergedCounty> {
        (0..n).map(|i| county(&format!("county {i}"), 1_000 + 37 * i, &[])).collect()
    }

    #[test]
    fn expired_time_limit_is_a_timeout() {
        let limit = Duration::from_millis(1);

        let err = solve(&isolated_counties(40), &SolverConfig::new(12).with_time_limit(limit)).unwrap_err();
        assert_eq!(err, SolveError::TimedOut { limit });
        assert_eq!(err.status(), SolveStatus::TimedOut);
    }

    #[test]
    fn time_limit_bounds_the_call() {
        let limit = Duration::from_millis(200);
        let started = Instant::now();

        let err = solve(&isolated_counties(40), &SolverConfig::new(12).with_time_limit(limit)).unwrap_err();

        // the solver itself stops, so the call returns close to the limit with nothing left running
        assert_eq!(err, SolveError::TimedOut { limit });
        assert!(started.elapsed() < Duration::from_secs(10), "took {:?}", started.elapsed());
    }

    #[test]
    fn generous_time_limit_still_solves() {
        let config = SolverConfig::new(2).with_time_limit(Duration::from_secs(60));
        let districting = solve(&two_pairs(), &config).unwrap();
        assert!(districting.objective.abs() < 1e-6);
    }

    #[test]
    fn repeated_runs_agree_on_objective() {
        let counties = vec![
            county("a", 120, &["b"]),
            county("b", 80, &["a"]),
            county("c", 150, &[]),
            county("d", 90, &["e"]),
            county("e", 60, &["d"]),
        ];
        let config = SolverConfig::new(3);

        let first = solve(&counties, &config).unwrap();
        let second = solve(&counties, &config).unwrap();
        assert!((first.objective - second.objective).abs() < 1e-6);
    }
}
