//! Tick driver: owns the graph, the brigades and the fire state for the
//! lifetime of a run.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::brigade::BrigadeTable;
use crate::config::SimulationConfig;
use crate::dispatch::{dispatch_all, BrigadeAction};
use crate::error::Result;
use crate::fire::{self, FireState};
use crate::graph::{LocationFlag, LocationGraph, LocationId};
use crate::observer::{NoopObserver, SimulationObserver, TickPhase, TickSnapshot};
use crate::topology::generate_graph;

/// Whether any fire is still burning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    Active,
    Settled,
}

/// How a settled run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    /// Brigades put out every fire.
    Extinguished,
    /// Brigades stopped making progress and the remaining fires burned out.
    BurnedOut,
    /// The start location could not catch fire.
    NeverIgnited,
}

/// Final report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// Locations put out by brigades, in suppression order.
    pub extinguished: Vec<LocationId>,
    /// Locations that burned out unreached.
    pub burned_out: Vec<LocationId>,
    pub ticks: u64,
    pub settled_by: Settlement,
}

impl RunOutcome {
    pub fn sorted_extinguished(&self) -> Vec<LocationId> {
        let mut sorted = self.extinguished.clone();
        sorted.sort_unstable();
        sorted
    }
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub ignited: Vec<LocationId>,
    pub actions: Vec<BrigadeAction>,
    /// Fires burned out because the tick made no progress.
    pub burned_out: Vec<LocationId>,
}

impl TickReport {
    pub fn suppressions(&self) -> usize {
        self.actions
            .iter()
            .filter(|action| matches!(action, BrigadeAction::Suppressed { .. }))
            .count()
    }
}

/// Fire spread and brigade dispatch over one location graph.
#[derive(Debug, Clone)]
pub struct Simulation {
    graph: LocationGraph,
    brigades: BrigadeTable,
    fires: FireState,
    tick: u64,
}

impl Simulation {
    /// Generate a graph from the configured sizing and seed, then place
    /// stations, water and brigades on it.
    pub fn generate(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let (locations, connections) = config.sizing()?;
        let graph = generate_graph(
            locations,
            connections,
            config.max_weight,
            config.seed.unwrap_or_default(),
        )?;
        Self::with_graph(graph, config)
    }

    /// Use a supplied graph, overlaying the configured water points and
    /// stations. Every station, configured or already flagged on `graph`, gets
    /// one brigade in ascending id order. Locations already burning in `graph`
    /// become active fires.
    pub fn with_graph(mut graph: LocationGraph, config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        for &id in config.water_locations.iter().chain(&config.station_locations) {
            graph.set_flag(id, LocationFlag::HasWater, true)?;
        }
        for &station in &config.station_locations {
            graph.set_flag(station, LocationFlag::IsStation, true)?;
        }

        // Stations flagged on the supplied graph get a brigade too.
        let stations: BTreeSet<LocationId> = graph
            .locations()
            .filter(|&id| graph.flags(id).is_some_and(|flags| flags.is_station))
            .collect();
        let mut brigades = BrigadeTable::new();
        for &station in &stations {
            brigades.spawn(
                station,
                config.truck_capacity,
                config.consumption_per_fire,
            );
        }

        let fires = FireState::from_graph(&graph);
        info!(
            locations = graph.len(),
            connections = graph.connection_count(),
            brigades = brigades.len(),
            "simulation ready"
        );
        Ok(Self {
            graph,
            brigades,
            fires,
            tick: 0,
        })
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn brigades(&self) -> &BrigadeTable {
        &self.brigades
    }

    /// Mutable access to the brigade table, e.g. to stage a scenario. The
    /// table still enforces water-level bounds.
    pub fn brigades_mut(&mut self) -> &mut BrigadeTable {
        &mut self.brigades
    }

    pub fn fires(&self) -> &FireState {
        &self.fires
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> SimulationState {
        if self.fires.has_active() {
            SimulationState::Active
        } else {
            SimulationState::Settled
        }
    }

    pub fn is_settled(&self) -> bool {
        self.state() == SimulationState::Settled
    }

    /// Ignite `location` if it can burn. Ineligible locations are ignored.
    pub fn start_fire(&mut self, location: LocationId) -> bool {
        fire::start_fire(&mut self.graph, &mut self.fires, location)
    }

    /// Spread every active fire by one ring.
    pub fn propagate(&mut self) -> Vec<LocationId> {
        fire::propagate(&mut self.graph, &mut self.fires)
    }

    /// Give every brigade one decision.
    pub fn dispatch_all(&mut self) -> Result<Vec<BrigadeAction>> {
        dispatch_all(&mut self.graph, &mut self.brigades, &mut self.fires)
    }

    pub fn snapshot(&self, phase: TickPhase) -> TickSnapshot {
        TickSnapshot::capture(self.tick, phase, &self.graph, &self.brigades, &self.fires)
    }

    /// Run one tick without an observer.
    pub fn step(&mut self) -> Result<TickReport> {
        self.step_observed(&mut NoopObserver)
    }

    /// Run one tick: spread, then dispatch. A tick that ignites nothing,
    /// suppresses nothing and leaves every brigade where it was settles the
    /// run by burning out the remaining fires.
    pub fn step_observed<O>(&mut self, observer: &mut O) -> Result<TickReport>
    where
        O: SimulationObserver + ?Sized,
    {
        self.tick += 1;
        let before = self.brigades.clone();

        let ignited = self.propagate();
        observer.on_snapshot(&self.snapshot(TickPhase::BeforeDispatch));

        let actions = self.dispatch_all()?;
        let suppressed = actions
            .iter()
            .any(|action| matches!(action, BrigadeAction::Suppressed { .. }));

        let mut burned_out = Vec::new();
        if ignited.is_empty() && !suppressed && self.brigades == before && self.fires.has_active()
        {
            burned_out = fire::burn_out(&mut self.graph, &mut self.fires);
            warn!(tick = self.tick, ?burned_out, "no brigade can progress; fires burned out");
        }
        observer.on_snapshot(&self.snapshot(TickPhase::AfterDispatch));

        Ok(TickReport {
            tick: self.tick,
            ignited,
            actions,
            burned_out,
        })
    }

    /// Start a fire at `start` and tick until nothing burns.
    pub fn run(&mut self, start: LocationId) -> Result<RunOutcome> {
        self.run_observed(start, &mut NoopObserver)
    }

    /// Like [`Simulation::run`], reporting a snapshot after ignition and
    /// before and after every dispatch.
    pub fn run_observed<O>(&mut self, start: LocationId, observer: &mut O) -> Result<RunOutcome>
    where
        O: SimulationObserver + ?Sized,
    {
        let ignited = self.start_fire(start);
        info!(start, ignited, "simulation started");
        observer.on_snapshot(&self.snapshot(TickPhase::Ignition));

        while self.fires.has_active() {
            self.step_observed(observer)?;
        }

        let outcome = self.outcome();
        info!(
            ticks = outcome.ticks,
            extinguished = outcome.extinguished.len(),
            burned_out = outcome.burned_out.len(),
            "simulation settled"
        );
        Ok(outcome)
    }

    /// Report of the run so far.
    pub fn outcome(&self) -> RunOutcome {
        let settled_by = if !self.fires.burned_out().is_empty() {
            Settlement::BurnedOut
        } else if self.fires.extinguished().is_empty() {
            Settlement::NeverIgnited
        } else {
            Settlement::Extinguished
        };
        RunOutcome {
            extinguished: self.fires.extinguished().to_vec(),
            burned_out: self.fires.burned_out().to_vec(),
            ticks: self.tick,
            settled_by,
        }
    }
}
