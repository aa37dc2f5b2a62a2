//! Read-only views of a running simulation handed to renderers and loggers.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::brigade::{BrigadeId, BrigadeTable};
use crate::fire::FireState;
use crate::graph::{LocationGraph, LocationId};

/// Point in a tick at which a snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPhase {
    /// Right after the first fire was started, before any tick ran.
    Ignition,
    /// After the fire spread, before brigades moved.
    BeforeDispatch,
    /// After every brigade moved.
    AfterDispatch,
}

/// Display class of a location, in rendering precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationState {
    Burning,
    /// A brigade is standing here.
    Occupied,
    /// Water point or station.
    Water,
    Burned,
    Safe,
}

impl LocationState {
    /// Single-character marker used by text renderers.
    pub fn symbol(self) -> char {
        match self {
            LocationState::Burning => '*',
            LocationState::Occupied => 'B',
            LocationState::Water => '~',
            LocationState::Burned => 'x',
            LocationState::Safe => '.',
        }
    }
}

/// Snapshot of simulation state exposed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub phase: TickPhase,
    pub active_fires: BTreeSet<LocationId>,
    pub burned: BTreeSet<LocationId>,
    pub brigade_positions: BTreeMap<BrigadeId, LocationId>,
    /// Display class of every location, indexed by id.
    pub locations: Vec<LocationState>,
}

impl TickSnapshot {
    pub(crate) fn capture(
        tick: u64,
        phase: TickPhase,
        graph: &LocationGraph,
        brigades: &BrigadeTable,
        fires: &FireState,
    ) -> Self {
        let brigade_positions: BTreeMap<BrigadeId, LocationId> = brigades
            .iter()
            .map(|brigade| (brigade.id, brigade.position))
            .collect();
        let occupied: BTreeSet<LocationId> = brigade_positions.values().copied().collect();

        let mut burned = BTreeSet::new();
        let mut locations = Vec::with_capacity(graph.len());
        for id in graph.locations() {
            let flags = graph.flags(id).unwrap_or_default();
            if flags.is_burned {
                burned.insert(id);
            }
            let state = if flags.on_fire {
                LocationState::Burning
            } else if occupied.contains(&id) {
                LocationState::Occupied
            } else if flags.is_refill_point() {
                LocationState::Water
            } else if flags.is_burned {
                LocationState::Burned
            } else {
                LocationState::Safe
            };
            locations.push(state);
        }

        Self {
            tick,
            phase,
            active_fires: fires.active().iter().copied().collect(),
            burned,
            brigade_positions,
            locations,
        }
    }
}

/// Receives snapshots between ticks. Observers cannot reach the simulation
/// itself, only the snapshot.
pub trait SimulationObserver {
    fn on_snapshot(&mut self, snapshot: &TickSnapshot);
}

impl<F> SimulationObserver for F
where
    F: FnMut(&TickSnapshot),
{
    fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
        (self)(snapshot);
    }
}

/// Observer that ignores every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {
    fn on_snapshot(&mut self, _snapshot: &TickSnapshot) {}
}
