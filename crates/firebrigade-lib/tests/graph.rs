mod common;

use firebrigade_lib::{
    distances_from, path, path_length, propagate, start_fire, suppress, Error, FireState,
    LocationFlag, LocationGraph,
};

use common::{graph_from_edges, line_graph};

/// Two equal-cost routes from 0 to 3 and a direct but expensive shortcut.
fn diamond() -> LocationGraph {
    graph_from_edges(4, &[(0, 1, 1), (1, 3, 1), (0, 2, 1), (2, 3, 1), (0, 3, 5)])
}

#[test]
fn invalid_connections_are_rejected() {
    let mut graph = LocationGraph::with_locations(3);
    graph.add_connection(0, 1, 4).expect("first connection");

    assert!(matches!(
        graph.add_connection(1, 1, 2),
        Err(Error::InvalidTopology { .. })
    ));
    assert!(matches!(
        graph.add_connection(1, 2, 0),
        Err(Error::InvalidTopology { .. })
    ));
    assert!(matches!(
        graph.add_connection(1, 2, -3),
        Err(Error::InvalidTopology { .. })
    ));
    assert!(matches!(
        graph.add_connection(1, 0, 7),
        Err(Error::InvalidTopology { .. })
    ));
    assert!(matches!(
        graph.add_connection(0, 5, 1),
        Err(Error::UnknownLocation { id: 5 })
    ));
    assert_eq!(graph.connection_count(), 1);
    assert_eq!(graph.weight(1, 0), Some(4));
}

#[test]
fn flag_writes_keep_location_invariants() {
    let mut graph = line_graph(3, 1);
    graph
        .set_flag(0, LocationFlag::IsStation, true)
        .expect_err("dry location cannot become a station");
    graph
        .set_flag(0, LocationFlag::HasWater, true)
        .expect("water on a safe location");
    graph
        .set_flag(0, LocationFlag::IsStation, true)
        .expect("station on water");
    graph
        .set_flag(0, LocationFlag::OnFire, true)
        .expect_err("stations never burn");
    graph
        .set_flag(0, LocationFlag::HasWater, false)
        .expect_err("stations keep their water");

    graph
        .set_flag(1, LocationFlag::OnFire, true)
        .expect("safe location ignites");
    assert!(matches!(
        graph.set_flag(1, LocationFlag::HasWater, true),
        Err(Error::FlagConflict { id: 1, flag: LocationFlag::HasWater, .. })
    ));
    assert!(matches!(
        graph.get_flag(9, LocationFlag::OnFire),
        Err(Error::UnknownLocation { id: 9 })
    ));
}

#[test]
fn shortest_path_prefers_lower_id_on_ties() {
    let graph = diamond();
    let route = path(&graph, 0, 3).expect("connected");
    assert_eq!(route.steps, vec![0, 1, 3]);
    assert_eq!(route.cost, 2);
    assert_eq!(route.interior(), &[1]);
    assert_eq!(path_length(&graph, 3, 0), Some(2));
}

#[test]
fn distances_cover_the_reachable_component_only() {
    let mut graph = diamond();
    let island = graph
        .add_location(Default::default())
        .expect("add location");

    let tree = distances_from(&graph, 0);
    assert_eq!(tree.distance(0), Some(0));
    assert_eq!(tree.distance(3), Some(2));
    assert_eq!(tree.distance(island), None);
    assert_eq!(tree.nearest([3, 2, island]), Some((2, 1)));
    assert_eq!(path(&graph, 0, island), None);
    assert_eq!(path_length(&graph, 0, 42), None);
}

#[test]
fn fire_spreads_one_ring_per_call() {
    let mut graph = line_graph(5, 1);
    let mut fires = FireState::new();
    assert!(start_fire(&mut graph, &mut fires, 2));
    assert!(!start_fire(&mut graph, &mut fires, 2), "already burning");

    assert_eq!(propagate(&mut graph, &mut fires), vec![1, 3]);
    assert_eq!(propagate(&mut graph, &mut fires), vec![0, 4]);
    assert!(propagate(&mut graph, &mut fires).is_empty());
    assert_eq!(fires.active(), &[2, 1, 3, 0, 4]);
}

#[test]
fn water_and_burned_locations_stop_the_spread() {
    let mut graph = line_graph(5, 1);
    graph
        .set_flag(3, LocationFlag::HasWater, true)
        .expect("water on a safe location");
    let mut fires = FireState::new();
    start_fire(&mut graph, &mut fires, 2);

    assert_eq!(propagate(&mut graph, &mut fires), vec![1]);
    assert!(suppress(&mut graph, &mut fires, 1));
    assert!(!suppress(&mut graph, &mut fires, 1), "already put out");

    assert!(propagate(&mut graph, &mut fires).is_empty());
    assert!(!graph.is_on_fire(0));
    assert!(!graph.is_on_fire(4));
    assert_eq!(fires.active(), &[2]);
    assert_eq!(fires.extinguished(), &[1]);
}
