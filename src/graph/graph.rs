use std::collections::{HashMap, VecDeque};

use crate::types::{CountyName, MergedCounty};

/// An undirected county adjacency graph in compressed sparse row format.
/// Node `i` is the `i`th county of the table the graph was built from.
#[derive(Debug, Default, Clone)]
pub struct CountyGraph {
    size: usize,
    offsets: Vec<u32>,
    edges: Vec<u32>,
    populations: Vec<u64>,
}

impl CountyGraph {
    /// Construct a graph from adjacency lists and node populations.
    pub(crate) fn new(edges: &[Vec<u32>], populations: Vec<u64>) -> Self {
        assert!(edges.len() == populations.len(), "edges.len() must equal populations.len()");
        edges.iter().enumerate().for_each(|(i, neighbors)| {
            assert!(neighbors.iter().all(|&n| (n as usize) < edges.len()), "edges[{i}] references a node out of range");
        });

        Self {
            size: edges.len(),
            offsets: std::iter::once(0u32).chain(
                edges.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            edges: edges.iter().flatten().copied().collect(),
            populations,
        }
    }

    /// Build the graph for a merged county table.
    ///
    /// Neighbor lists are symmetrized and deduplicated; references that do not resolve to a county in
    /// `counties` are skipped, so callers are expected to have validated the table first.
    pub fn from_counties(counties: &[MergedCounty]) -> Self {
        let index: HashMap<&CountyName, u32> = counties.iter().enumerate()
            .map(|(i, c)| (&c.county_name, i as u32))
            .collect();

        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); counties.len()];
        for (i, county) in counties.iter().enumerate() {
            for &j in county.neighbor_names().filter_map(|n| index.get(n)) {
                if j as usize != i {
                    adjacency[i].push(j);
                    adjacency[j as usize].push(i as u32);
                }
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        Self::new(&adjacency, counties.iter().map(|c| c.population).collect())
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.size }

    /// Get the number of directed edge entries (twice the number of undirected edges).
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Get the population of a node.
    #[inline] pub fn population(&self, node: usize) -> u64 { self.populations[node] }

    /// Get the range of edges for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get an iterator over the neighbors of a given node.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// Iterate over each undirected edge once, as `(u, v)` with `u < v`.
    pub fn undirected_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |u| self.edges(u).filter(move |&v| u < v).map(move |v| (u, v)))
    }

    /// Connected components, each sorted, ordered by their smallest node.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.size];
        let mut components = Vec::new();

        for start in 0..self.size {
            if seen[start] { continue }
            seen[start] = true;
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(u) = queue.pop_front() {
                for v in self.edges(u) {
                    if !seen[v] {
                        seen[v] = true;
                        component.push(v);
                        queue.push_back(v);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Check whether `nodes` induce a connected subgraph. The empty set counts as connected.
    pub fn is_connected_subset(&self, nodes: &[usize]) -> bool {
        let Some(&start) = nodes.first() else { return true };

        let mut member = vec![false; self.size];
        nodes.iter().for_each(|&u| member[u] = true);

        let mut reached = 1;
        member[start] = false;
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            for v in self.edges(u) {
                if member[v] {
                    member[v] = false;
                    reached += 1;
                    stack.push(v);
                }
            }
        }

        reached == nodes.iter().collect::<std::collections::HashSet<_>>().len()
    }
}
