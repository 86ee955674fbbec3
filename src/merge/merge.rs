use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{AdjacencyRecord, CountyName, CountyRecord, MergedCounty};

use super::{IntegrityIssue, IntegrityReport};

/// Result of joining population onto adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    /// One row per populated county, in population-table order.
    pub counties: Vec<MergedCounty>,
    /// Adjacency entries whose county has no population row.
    pub orphans: Vec<CountyName>,
}

/// Left join from `population` into `adjacency` on the normalized county name.
///
/// Every populated county is kept; a county with no adjacency entry gets `neighbors: None`.
/// Neither input is modified.
pub fn merge(population: &[CountyRecord], adjacency: &[AdjacencyRecord]) -> MergedTable {
    let mut neighbors_by_name: HashMap<&CountyName, BTreeSet<CountyName>> = HashMap::with_capacity(adjacency.len());
    for record in adjacency {
        neighbors_by_name.entry(&record.county_name).or_default().extend(record.neighbors.iter().cloned());
    }

    let counties = population.iter()
        .map(|record| MergedCounty {
            county_name: record.county_name.clone(),
            population: record.population,
            neighbors: neighbors_by_name.get(&record.county_name).cloned(),
        })
        .collect();

    let populated: HashSet<&CountyName> = population.iter().map(|r| &r.county_name).collect();
    let mut seen = HashSet::new();
    let orphans = adjacency.iter()
        .map(|r| &r.county_name)
        .filter(|name| !populated.contains(name) && seen.insert(*name))
        .cloned()
        .collect();

    MergedTable { counties, orphans }
}

impl MergedTable {
    /// Collect every integrity problem that would corrupt the contiguity constraints.
    pub fn integrity(&self) -> IntegrityReport {
        let known: HashSet<&CountyName> = self.counties.iter().map(|c| &c.county_name).collect();
        let mut issues = Vec::new();

        for county in &self.counties {
            match &county.neighbors {
                None => issues.push(IntegrityIssue::MissingAdjacency { county: county.county_name.clone() }),
                Some(neighbors) => issues.extend(neighbors.iter()
                    .filter(|n| !known.contains(n))
                    .map(|n| IntegrityIssue::UnknownNeighbor { county: county.county_name.clone(), neighbor: n.clone() })),
            }
        }

        issues.extend(self.orphans.iter().map(|county| IntegrityIssue::OrphanAdjacency { county: county.clone() }));

        IntegrityReport { issues }
    }

    /// Drop neighbor references that do not resolve to a populated county, returning them.
    pub fn prune_unknown_neighbors(&mut self) -> Vec<(CountyName, CountyName)> {
        let known: HashSet<CountyName> = self.counties.iter().map(|c| c.county_name.clone()).collect();
        let mut pruned = Vec::new();

        for county in &mut self.counties {
            let name = county.county_name.clone();
            if let Some(neighbors) = county.neighbors.as_mut() {
                neighbors.retain(|n| {
                    let keep = known.contains(n);
                    if !keep { pruned.push((name.clone(), n.clone())) }
                    keep
                });
            }
        }

        pruned
    }

    /// Total population across all merged counties.
    pub fn total_population(&self) -> u64 {
        self.counties.iter().map(|c| c.population).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Vec<CountyRecord> {
        vec![CountyRecord::new("a", 10), CountyRecord::new("b", 20), CountyRecord::new("c", 30)]
    }

    #[test]
    fn left_join_keeps_every_populated_county_in_order() {
        let adjacency = vec![AdjacencyRecord::new("b", ["a"]), AdjacencyRecord::new("a", ["b"])];
        let table = merge(&population(), &adjacency);

        let names = table.counties.iter().map(|c| c.county_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(table.counties[0].neighbors, Some([CountyName::new("b")].into()));
        assert_eq!(table.counties[2].neighbors, None);
        assert_eq!(table.total_population(), 60);
    }

    #[test]
    fn does_not_modify_inputs() {
        let population = population();
        let adjacency = vec![AdjacencyRecord::new("a", ["b"])];
        let (p, a) = (population.clone(), adjacency.clone());
        let _ = merge(&population, &adjacency);
        assert_eq!((population, adjacency), (p, a));
    }

    #[test]
    fn county_without_adjacency_is_flagged() {
        let adjacency = vec![AdjacencyRecord::new("a", ["b"]), AdjacencyRecord::new("b", ["a"])];
        let report = merge(&population(), &adjacency).integrity();
        assert_eq!(report.issues, vec![IntegrityIssue::MissingAdjacency { county: "c".into() }]);
        assert!(!report.is_clean());
    }

    #[test]
    fn adjacency_entries_without_population_are_orphans() {
        let adjacency = vec![
            AdjacencyRecord::new("a", ["b"]),
            AdjacencyRecord::new("b", ["a", "c"]),
            AdjacencyRecord::new("c", ["b"]),
            AdjacencyRecord::new("z", Vec::<&str>::new()),
        ];
        let table = merge(&population(), &adjacency);
        assert_eq!(table.orphans, vec![CountyName::new("z")]);
        assert_eq!(table.integrity().issues, vec![IntegrityIssue::OrphanAdjacency { county: "z".into() }]);
    }

    #[test]
    fn unknown_neighbors_are_reported_then_pruned() {
        let adjacency = vec![
            AdjacencyRecord::new("a", ["b", "beaver county, pa"]),
            AdjacencyRecord::new("b", ["a"]),
            AdjacencyRecord::new("c", Vec::<&str>::new()),
        ];
        let mut table = merge(&population(), &adjacency);
        assert_eq!(table.integrity().issues, vec![IntegrityIssue::UnknownNeighbor {
            county: "a".into(),
            neighbor: "beaver county, pa".into(),
        }]);

        let pruned = table.prune_unknown_neighbors();
        assert_eq!(pruned, vec![(CountyName::new("a"), CountyName::new("beaver county, pa"))]);
        assert!(table.integrity().is_clean());
    }
}
