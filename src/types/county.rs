use std::collections::BTreeSet;

use super::CountyName;

/// One row of the population table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyRecord {
    pub county_name: CountyName,
    pub population: u64,
}

impl CountyRecord {
    pub fn new(county_name: impl Into<CountyName>, population: u64) -> Self {
        Self { county_name: county_name.into(), population }
    }
}

/// One county's entry in the adjacency relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRecord {
    pub county_name: CountyName,
    pub neighbors: BTreeSet<CountyName>,
}

impl AdjacencyRecord {
    pub fn new<I, N>(county_name: impl Into<CountyName>, neighbors: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<CountyName>,
    {
        Self {
            county_name: county_name.into(),
            neighbors: neighbors.into_iter().map(Into::into).collect(),
        }
    }
}

/// A populated county joined with its adjacency entry.
///
/// `neighbors` is `None` when the adjacency source has no entry for the county at all,
/// which is distinct from a county with an entry but no neighbors (an island).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedCounty {
    pub county_name: CountyName,
    pub population: u64,
    pub neighbors: Option<BTreeSet<CountyName>>,
}

impl MergedCounty {
    pub fn new<I, N>(county_name: impl Into<CountyName>, population: u64, neighbors: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<CountyName>,
    {
        Self {
            county_name: county_name.into(),
            population,
            neighbors: Some(neighbors.into_iter().map(Into::into).collect()),
        }
    }

    /// Iterate over the neighbor names (empty when there is no adjacency entry).
    pub fn neighbor_names(&self) -> impl Iterator<Item = &CountyName> {
        self.neighbors.iter().flatten()
    }
}
