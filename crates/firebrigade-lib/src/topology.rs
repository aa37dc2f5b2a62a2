//! Building location graphs from outside the engine: seeded random generation
//! and JSON topology files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Connection, LocationGraph, LocationId, Weight};

/// Upper bound on connection weights when none is configured.
pub const DEFAULT_MAX_WEIGHT: Weight = 10;

/// Largest number of distinct undirected connections between `locations`.
pub fn max_connections(locations: usize) -> usize {
    locations.saturating_mul(locations.saturating_sub(1)) / 2
}

/// Generate `connections` distinct random connections over `locations`
/// unflagged locations, each weighted uniformly in `1..=max_weight`.
///
/// The same seed always yields the same graph.
pub fn generate_graph(
    locations: usize,
    connections: usize,
    max_weight: Weight,
    seed: u64,
) -> Result<LocationGraph> {
    if max_weight == 0 {
        return Err(Error::config("max_weight must be at least 1"));
    }
    let limit = max_connections(locations);
    if connections > limit {
        return Err(Error::config(format!(
            "{connections} connections requested but {locations} locations admit at most {limit}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let chosen = if connections.saturating_mul(2) <= limit {
        sample_sparse_pairs(&mut rng, locations, connections)
    } else {
        sample_dense_pairs(&mut rng, locations, connections)
    };

    let mut graph = LocationGraph::with_locations(locations);
    for (a, b) in chosen {
        let weight = rng.gen_range(1..=max_weight);
        graph.add_connection(a, b, i64::from(weight))?;
    }
    debug!(locations, connections, seed, "generated topology");
    Ok(graph)
}

/// Draw random pairs until `connections` distinct ones are found. Used when
/// at most half of all pairs are requested, so rejections stay rare and memory
/// grows with `connections` rather than with the pair count.
fn sample_sparse_pairs(
    rng: &mut StdRng,
    locations: usize,
    connections: usize,
) -> Vec<(LocationId, LocationId)> {
    let mut seen: HashSet<(LocationId, LocationId)> = HashSet::with_capacity(connections);
    let mut chosen = Vec::with_capacity(connections);
    while chosen.len() < connections {
        let a = rng.gen_range(0..locations);
        let b = rng.gen_range(0..locations);
        if a == b {
            continue;
        }
        let pair = (a.min(b), a.max(b));
        if seen.insert(pair) {
            chosen.push(pair);
        }
    }
    chosen
}

/// Enumerate every pair and shuffle `connections` of them to the front.
fn sample_dense_pairs(
    rng: &mut StdRng,
    locations: usize,
    connections: usize,
) -> Vec<(LocationId, LocationId)> {
    let mut pairs: Vec<(LocationId, LocationId)> = (0..locations)
        .flat_map(|a| (a + 1..locations).map(move |b| (a, b)))
        .collect();
    let (chosen, _) = pairs.partial_shuffle(rng, connections);
    chosen.to_vec()
}

/// On-disk description of a pre-built graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyFile {
    pub location_count: usize,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

/// A connection as written in a topology file. The weight is signed so that
/// bad input reaches validation instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub a: LocationId,
    pub b: LocationId,
    pub weight: i64,
}

impl From<Connection> for ConnectionRecord {
    fn from(connection: Connection) -> Self {
        Self {
            a: connection.a,
            b: connection.b,
            weight: i64::from(connection.weight),
        }
    }
}

impl TopologyFile {
    /// Describe an existing graph. Flags are not part of a topology.
    pub fn from_graph(graph: &LocationGraph) -> Self {
        Self {
            location_count: graph.len(),
            connections: graph.connections().map(ConnectionRecord::from).collect(),
        }
    }

    /// Build the graph, validating every connection.
    pub fn into_graph(self) -> Result<LocationGraph> {
        let mut graph = LocationGraph::with_locations(self.location_count);
        for record in self.connections {
            graph.add_connection(record.a, record.b, record.weight)?;
        }
        Ok(graph)
    }
}

/// Load a graph from a JSON topology file.
pub fn load_topology(path: &Path) -> Result<LocationGraph> {
    let contents = fs::read_to_string(path)?;
    let file: TopologyFile =
        serde_json::from_str(&contents).map_err(|err| Error::TopologyLoad {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    file.into_graph()
}

/// Write a graph's topology as pretty-printed JSON.
pub fn save_topology(graph: &LocationGraph, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&TopologyFile::from_graph(graph))?;
    fs::write(path, json)?;
    Ok(())
}
