//! JSON reading operations for the county adjacency relation.

use std::{collections::BTreeMap, fs::File, io::{BufReader, Read}, path::Path};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A neighbor entry is either a bare name or an object keyed by neighbor name(s).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NeighborEntry {
    Name(String),
    Keyed(Map<String, Value>),
}

impl NeighborEntry {
    fn into_names(self) -> Vec<String> {
        match self {
            NeighborEntry::Name(name) => vec![name],
            NeighborEntry::Keyed(map) => map.into_iter().map(|(name, _)| name).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdjacencyEntry {
    county_name: String,
    neighbors: Vec<NeighborEntry>,
}

/// Either a list of `{county_name, neighbors}` records or an object mapping county to neighbors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AdjacencyDocument {
    Records(Vec<AdjacencyEntry>),
    ByCounty(BTreeMap<String, Vec<NeighborEntry>>),
}

/// Raw `(county, neighbors)` rows, names exactly as they appear in the source.
pub(crate) type RawAdjacency = Vec<(String, Vec<String>)>;

/// Reads adjacency rows from a JSON file at `path`.
pub(crate) fn read_adjacency_json(path: &Path) -> Result<RawAdjacency> {
    let file = File::open(path)
        .with_context(|| format!("[io::json] Failed to open adjacency file: {}", path.display()))?;
    read_adjacency_from_reader(BufReader::new(file))
        .with_context(|| format!("[io::json] Failed to read adjacency JSON from {:?}", path))
}

/// Reads adjacency rows from a JSON string.
pub(crate) fn read_adjacency_json_string(json: &str) -> Result<RawAdjacency> {
    read_adjacency_from_reader(json.as_bytes())
        .context("[io::json] Failed to read adjacency JSON from string")
}

fn read_adjacency_from_reader(reader: impl Read) -> Result<RawAdjacency> {
    let document: AdjacencyDocument = serde_json::from_reader(reader)?;

    let rows: RawAdjacency = match document {
        AdjacencyDocument::Records(entries) => entries.into_iter()
            .map(|entry| (entry.county_name, entry.neighbors.into_iter().flat_map(NeighborEntry::into_names).collect()))
            .collect(),
        AdjacencyDocument::ByCounty(map) => map.into_iter()
            .map(|(county, neighbors)| (county, neighbors.into_iter().flat_map(NeighborEntry::into_names).collect()))
            .collect(),
    };

    for (i, (county, neighbors)) in rows.iter().enumerate() {
        ensure!(!county.trim().is_empty(), "entry {}: blank county_name", i + 1);
        ensure!(neighbors.iter().all(|n| !n.trim().is_empty()), "entry {} ('{county}'): blank neighbor name", i + 1);
    }

    Ok(rows)
}
