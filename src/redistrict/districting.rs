use std::fmt::Write;

use crate::{graph::CountyGraph, types::DistrictAssignment};

use super::SolveStatus;

/// A solved assignment of counties to districts, with per-district totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Districting {
    /// One assignment per input county, in input order.
    pub assignments: Vec<DistrictAssignment>,
    /// Objective value reported by the solver (sum of the deviation variables).
    pub objective: f64,
    /// Total population divided by the number of districts.
    pub ideal_population: f64,
    /// Population of each district, indexed by district.
    pub district_populations: Vec<u64>,
    pub status: SolveStatus,
}

impl Districting {
    pub(crate) fn new(assignments: Vec<DistrictAssignment>, populations: &[u64], num_districts: u32, objective: f64) -> Self {
        let mut district_populations = vec![0u64; num_districts as usize];
        for (assignment, &population) in assignments.iter().zip(populations) {
            district_populations[assignment.assigned_district as usize] += population;
        }
        let total: u64 = populations.iter().sum();

        Self {
            assignments,
            objective,
            ideal_population: total as f64 / num_districts as f64,
            district_populations,
            status: SolveStatus::Optimal,
        }
    }

    /// Number of districts, including empty ones.
    #[inline] pub fn num_districts(&self) -> usize { self.district_populations.len() }

    /// Absolute deviation of each district from the ideal population.
    pub fn deviations(&self) -> impl Iterator<Item = f64> + '_ {
        self.district_populations.iter().map(|&p| (p as f64 - self.ideal_population).abs())
    }

    /// Largest absolute deviation from the ideal population.
    pub fn max_deviation(&self) -> f64 {
        self.deviations().fold(0.0, f64::max)
    }

    /// Indices of the counties assigned to `district`.
    pub fn counties_in(&self, district: u32) -> Vec<usize> {
        self.assignments.iter().enumerate()
            .filter(|(_, a)| a.assigned_district == district)
            .map(|(i, _)| i)
            .collect()
    }

    /// Districts whose counties do not form one connected piece of `graph`.
    ///
    /// `graph` must be built from the same county table, so that node `i` is the `i`th assignment.
    pub fn disconnected_districts(&self, graph: &CountyGraph) -> Vec<u32> {
        (0..self.num_districts() as u32)
            .filter(|&d| !graph.is_connected_subset(&self.counties_in(d)))
            .collect()
    }

    /// Per-district table: county count, population and deviation.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:>8} {:>8} {:>12} {:>12}", "district", "counties", "population", "deviation");
        for (d, (&population, deviation)) in self.district_populations.iter().zip(self.deviations()).enumerate() {
            let counties = self.counties_in(d as u32).len();
            let _ = writeln!(out, "{d:>8} {counties:>8} {population:>12} {deviation:>12.1}");
        }
        let _ = write!(out, "ideal {:.1}, objective {:.1}, max deviation {:.1}", self.ideal_population, self.objective, self.max_deviation());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn districting() -> Districting {
        let assignments = vec![
            DistrictAssignment::new("a", 0),
            DistrictAssignment::new("b", 1),
            DistrictAssignment::new("c", 0),
            DistrictAssignment::new("d", 1),
        ];
        Districting::new(assignments, &[100, 150, 100, 50], 2, 0.0)
    }

    #[test]
    fn totals_populations_per_district() {
        let districting = districting();
        assert_eq!(districting.ideal_population, 200.0);
        assert_eq!(districting.district_populations, vec![200, 200]);
        assert_eq!(districting.max_deviation(), 0.0);
        assert_eq!(districting.counties_in(1), vec![1, 3]);
    }

    #[test]
    fn reports_districts_that_are_not_connected() {
        // path a - b - c - d: district 0 = {a, c} and district 1 = {b, d} are both split
        let graph = CountyGraph::new(&[vec![1], vec![0, 2], vec![1, 3], vec![2]], vec![100, 150, 100, 50]);
        assert_eq!(districting().disconnected_districts(&graph), vec![0, 1]);

        // only a - c adjacent: district 0 holds together, district 1 does not
        let graph = CountyGraph::new(&[vec![2], vec![], vec![0], vec![]], vec![100, 150, 100, 50]);
        assert_eq!(districting().disconnected_districts(&graph), vec![1]);

        // a - c and b - d
        let graph = CountyGraph::new(&[vec![2], vec![3], vec![0], vec![1]], vec![100, 150, 100, 50]);
        assert!(districting().disconnected_districts(&graph).is_empty());
    }

    #[test]
    fn summary_lists_every_district() {
        let summary = districting().summary();
        assert_eq!(summary.lines().count(), 4);
        assert!(summary.ends_with("ideal 200.0, objective 0.0, max deviation 0.0"));
    }
}
