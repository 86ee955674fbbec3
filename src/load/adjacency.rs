use std::{collections::{BTreeMap, BTreeSet}, path::Path};

use anyhow::Result;

use crate::{io::{self, json::RawAdjacency}, types::{AdjacencyRecord, CountyName}};

/// Load the adjacency relation from a JSON file.
pub fn load_adjacency(path: &Path) -> Result<Vec<AdjacencyRecord>> {
    Ok(normalize(io::json::read_adjacency_json(path)?))
}

/// Load the adjacency relation from JSON text.
pub fn load_adjacency_str(json: &str) -> Result<Vec<AdjacencyRecord>> {
    Ok(normalize(io::json::read_adjacency_json_string(json)?))
}

/// Normalize names, union repeated entries for one county, and drop self-references.
/// Records keep the order in which each county first appears.
fn normalize(rows: RawAdjacency) -> Vec<AdjacencyRecord> {
    let mut order: Vec<CountyName> = Vec::new();
    let mut neighbors: BTreeMap<CountyName, BTreeSet<CountyName>> = BTreeMap::new();

    for (county, names) in rows {
        let county = CountyName::new(&county);
        let entry = neighbors.entry(county.clone()).or_insert_with(|| {
            order.push(county.clone());
            BTreeSet::new()
        });
        entry.extend(names.iter().map(|n| CountyName::new(n)).filter(|n| *n != county));
    }

    order.into_iter()
        .map(|county_name| {
            let neighbors = neighbors.remove(&county_name).unwrap_or_default();
            AdjacencyRecord { county_name, neighbors }
        })
        .collect()
}

/// Pairs `(a, b)` where `a` lists `b` as a neighbor but `b` does not list `a`.
/// Neighbors with no entry of their own are not reported here; the merger flags those.
pub fn symmetry_mismatches(records: &[AdjacencyRecord]) -> Vec<(CountyName, CountyName)> {
    let by_name: BTreeMap<&CountyName, &BTreeSet<CountyName>> = records.iter()
        .map(|r| (&r.county_name, &r.neighbors))
        .collect();

    records.iter()
        .flat_map(|r| r.neighbors.iter().map(move |n| (&r.county_name, n)))
        .filter(|(a, b)| by_name.get(b).is_some_and(|back| !back.contains(*a)))
        .map(|(a, b)| (a.clone(), b.clone()))
        .collect()
}
