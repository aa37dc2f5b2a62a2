use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::graph::{LocationGraph, LocationId};

/// Total traversal cost along a route.
pub type Cost = u64;

/// Lowest-cost route between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Locations visited in order; first is the origin, last the goal.
    pub steps: Vec<LocationId>,
    pub cost: Cost,
}

impl Route {
    /// Locations strictly between origin and goal.
    pub fn interior(&self) -> &[LocationId] {
        interior(&self.steps)
    }
}

/// Locations strictly between the first and last entry of `steps`.
pub(crate) fn interior(steps: &[LocationId]) -> &[LocationId] {
    if steps.len() <= 2 {
        &[]
    } else {
        &steps[1..steps.len() - 1]
    }
}

/// Result of a single-source search: the cost and predecessor of every
/// location reachable from the origin.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    origin: LocationId,
    distances: Vec<Option<Cost>>,
    parents: Vec<Option<LocationId>>,
}

impl ShortestPathTree {
    pub fn origin(&self) -> LocationId {
        self.origin
    }

    /// Cost from the origin, or `None` when `target` is unreachable.
    pub fn distance(&self, target: LocationId) -> Option<Cost> {
        self.distances.get(target).copied().flatten()
    }

    /// Rebuild the route to `target`, or `None` when it is unreachable.
    pub fn route_to(&self, target: LocationId) -> Option<Route> {
        let cost = self.distance(target)?;
        let mut steps = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            steps.push(node);
            if node == self.origin {
                break;
            }
            current = self.parents[node];
        }
        steps.reverse();
        Some(Route { steps, cost })
    }

    /// Pick the reachable candidate with the lowest cost, breaking ties by the
    /// lowest id. Unreachable candidates are skipped.
    pub fn nearest<I>(&self, candidates: I) -> Option<(LocationId, Cost)>
    where
        I: IntoIterator<Item = LocationId>,
    {
        candidates
            .into_iter()
            .filter_map(|candidate| self.distance(candidate).map(|cost| (candidate, cost)))
            .min_by(|(a_id, a_cost), (b_id, b_cost)| {
                a_cost.cmp(b_cost).then_with(|| a_id.cmp(b_id))
            })
    }
}

/// Cost of the lowest-cost route from `start` to `goal`. `None` means the
/// two locations are not connected, which is an ordinary outcome.
pub fn path_length(graph: &LocationGraph, start: LocationId, goal: LocationId) -> Option<Cost> {
    path(graph, start, goal).map(|route| route.cost)
}

/// Lowest-cost route from `start` to `goal`, or `None` when no route exists.
pub fn path(graph: &LocationGraph, start: LocationId, goal: LocationId) -> Option<Route> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(Route {
            steps: vec![start],
            cost: 0,
        });
    }
    dijkstra(graph, start, Some(goal)).route_to(goal)
}

/// Run a full single-source search from `start`.
pub fn distances_from(graph: &LocationGraph, start: LocationId) -> ShortestPathTree {
    dijkstra(graph, start, None)
}

/// Dijkstra's algorithm over positive integer weights. The heap pops by
/// `(cost, id)` and a node only changes parent on a strictly cheaper route, so
/// equal-cost ties always resolve the same way.
fn dijkstra(graph: &LocationGraph, start: LocationId, goal: Option<LocationId>) -> ShortestPathTree {
    let mut tree = ShortestPathTree {
        origin: start,
        distances: vec![None; graph.len()],
        parents: vec![None; graph.len()],
    };
    if !graph.contains(start) {
        return tree;
    }

    let mut settled = vec![false; graph.len()];
    let mut queue = BinaryHeap::new();
    tree.distances[start] = Some(0);
    queue.push(QueueEntry::new(start, 0));

    while let Some(entry) = queue.pop() {
        if settled[entry.node] {
            continue;
        }
        settled[entry.node] = true;

        if Some(entry.node) == goal {
            break;
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if settled[next] {
                continue;
            }
            let next_cost = entry.cost + Cost::from(edge.weight);
            if tree.distances[next].map_or(true, |known| next_cost < known) {
                tree.distances[next] = Some(next_cost);
                tree.parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    tree
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: LocationId,
    cost: Cost,
}

impl QueueEntry {
    fn new(node: LocationId, cost: Cost) -> Self {
        Self { node, cost }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 -1- 1 -1- 3
    ///  \         /
    ///   5 - 2 - 1
    fn diamond() -> LocationGraph {
        let mut graph = LocationGraph::with_locations(4);
        graph.add_connection(0, 1, 1).unwrap();
        graph.add_connection(1, 3, 1).unwrap();
        graph.add_connection(0, 2, 5).unwrap();
        graph.add_connection(2, 3, 1).unwrap();
        graph
    }

    #[test]
    fn prefers_lower_total_weight_over_fewer_hops() {
        let mut graph = LocationGraph::with_locations(3);
        graph.add_connection(0, 2, 10).unwrap();
        graph.add_connection(0, 1, 3).unwrap();
        graph.add_connection(1, 2, 3).unwrap();

        let route = path(&graph, 0, 2).expect("route exists");
        assert_eq!(route.steps, vec![0, 1, 2]);
        assert_eq!(route.cost, 6);
        assert_eq!(route.interior(), &[1]);
    }

    #[test]
    fn reflexive_route_is_single_step() {
        let graph = diamond();
        for id in graph.locations() {
            let route = path(&graph, id, id).unwrap();
            assert_eq!(route.steps, vec![id]);
            assert_eq!(path_length(&graph, id, id), Some(0));
            assert!(route.interior().is_empty());
        }
    }

    #[test]
    fn tree_covers_every_reachable_node() {
        let graph = diamond();
        let tree = distances_from(&graph, 0);
        assert_eq!(tree.distance(3), Some(2));
        assert_eq!(tree.distance(2), Some(3));
        assert_eq!(tree.route_to(2).unwrap().steps, vec![0, 1, 3, 2]);
        assert_eq!(tree.nearest([2, 3]), Some((3, 2)));
    }

    #[test]
    fn nearest_breaks_ties_by_lowest_id() {
        let mut graph = LocationGraph::with_locations(3);
        graph.add_connection(0, 1, 2).unwrap();
        graph.add_connection(0, 2, 2).unwrap();
        let tree = distances_from(&graph, 0);
        assert_eq!(tree.nearest([2, 1]), Some((1, 2)));
    }

    #[test]
    fn unknown_locations_have_no_route() {
        let graph = diamond();
        assert_eq!(path(&graph, 0, 42), None);
        assert_eq!(path_length(&graph, 42, 42), None);
        assert_eq!(distances_from(&graph, 42).distance(0), None);
    }
}
