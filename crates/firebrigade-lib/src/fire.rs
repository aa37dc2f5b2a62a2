//! Fire bookkeeping and the per-tick spread rule.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::graph::{LocationGraph, LocationId};

/// Active and finished fires of one simulation.
///
/// `active` mirrors the `on_fire` flags of the graph exactly and keeps the
/// order in which locations caught fire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FireState {
    active: Vec<LocationId>,
    burning: HashSet<LocationId>,
    extinguished: Vec<LocationId>,
    burned_out: Vec<LocationId>,
}

impl FireState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a graph whose locations may already be burning.
    pub fn from_graph(graph: &LocationGraph) -> Self {
        let active: Vec<LocationId> = graph.burning().collect();
        Self {
            burning: active.iter().copied().collect(),
            active,
            ..Self::default()
        }
    }

    /// Locations currently burning, in ignition order.
    pub fn active(&self) -> &[LocationId] {
        &self.active
    }

    /// Locations put out by brigades, in suppression order.
    pub fn extinguished(&self) -> &[LocationId] {
        &self.extinguished
    }

    /// Locations that burned out when no brigade could reach them.
    pub fn burned_out(&self) -> &[LocationId] {
        &self.burned_out
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    fn push_active(&mut self, id: LocationId) {
        if self.burning.insert(id) {
            self.active.push(id);
        }
    }

    fn remove_active(&mut self, id: LocationId) {
        if self.burning.remove(&id) {
            self.active.retain(|&active| active != id);
        }
    }
}

/// Ignite a single location if it is flammable. Water points, stations and
/// burned locations are left alone without error.
pub fn start_fire(graph: &mut LocationGraph, fires: &mut FireState, location: LocationId) -> bool {
    if !graph.ignite(location) {
        debug!(location, "start location cannot ignite");
        return false;
    }
    fires.push_active(location);
    debug!(location, "fire started");
    true
}

/// Advance the fire by one ring.
///
/// Only locations burning when the call starts spread; every flammable
/// neighbour of one of them catches fire exactly once and is appended to the
/// active set. Newly ignited locations spread on the next call.
pub fn propagate(graph: &mut LocationGraph, fires: &mut FireState) -> Vec<LocationId> {
    let mut visited: HashSet<LocationId> = fires.burning.clone();
    let mut frontier: VecDeque<LocationId> = fires.active.iter().copied().collect();
    let mut ignited = Vec::new();

    while let Some(current) = frontier.pop_front() {
        let neighbours: Vec<LocationId> = graph.neighbours(current).map(|edge| edge.target).collect();
        for next in neighbours {
            if !visited.insert(next) {
                continue;
            }
            if graph.ignite(next) {
                ignited.push(next);
            }
        }
    }

    for &location in &ignited {
        fires.push_active(location);
    }
    if !ignited.is_empty() {
        debug!(?ignited, "fire spread");
    }
    ignited
}

/// Put out a burning location, recording it as extinguished. Returns `false`
/// when the location was not burning, e.g. another brigade got there first.
pub fn suppress(graph: &mut LocationGraph, fires: &mut FireState, location: LocationId) -> bool {
    if !graph.extinguish(location) {
        return false;
    }
    fires.remove_active(location);
    fires.extinguished.push(location);
    true
}

/// Burn out every remaining fire. Used when no brigade can make further
/// progress, so the run still settles.
pub fn burn_out(graph: &mut LocationGraph, fires: &mut FireState) -> Vec<LocationId> {
    let remaining = std::mem::take(&mut fires.active);
    fires.burning.clear();
    for &location in &remaining {
        graph.extinguish(location);
    }
    fires.burned_out.extend_from_slice(&remaining);
    remaining
}
