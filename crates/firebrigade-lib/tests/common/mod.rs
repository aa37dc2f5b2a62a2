#![allow(dead_code)]

use firebrigade_lib::{LocationGraph, LocationId, SimulationConfig};

/// Path graph `0-1-...-(len-1)` with every connection weighted `weight`.
pub fn line_graph(len: usize, weight: i64) -> LocationGraph {
    let mut graph = LocationGraph::with_locations(len);
    for id in 1..len {
        graph
            .add_connection(id - 1, id, weight)
            .expect("line connection is valid");
    }
    graph
}

/// Graph built from `(a, b, weight)` triples over `len` locations.
pub fn graph_from_edges(len: usize, edges: &[(LocationId, LocationId, i64)]) -> LocationGraph {
    let mut graph = LocationGraph::with_locations(len);
    for &(a, b, weight) in edges {
        graph
            .add_connection(a, b, weight)
            .expect("fixture connection is valid");
    }
    graph
}

/// Config with one station per id in `stations` and the given tank size.
pub fn stations_config(stations: &[LocationId], capacity: u32) -> SimulationConfig {
    SimulationConfig::new(capacity).with_stations(stations.iter().copied())
}
