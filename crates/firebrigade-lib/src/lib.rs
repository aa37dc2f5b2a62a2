//! Fire brigade simulation engine.
//!
//! This crate models fire spreading over a weighted graph of locations and
//! the dispatch of water-carrying brigades that travel along shortest paths
//! to put it out. Higher-level consumers (the CLI, renderers) should drive
//! runs through [`Simulation`] and observe them through
//! [`SimulationObserver`] instead of mutating engine state directly.
//!

pub mod brigade;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fire;
pub mod graph;
pub mod observer;
pub mod output;
pub mod path;
pub mod simulation;
pub mod topology;

pub use brigade::{Brigade, BrigadeId, BrigadeTable};
pub use config::SimulationConfig;
pub use dispatch::{advance_along, dispatch_all, BrigadeAction, Movement, MovementKind};
pub use error::{Error, Result};
pub use fire::{propagate, start_fire, suppress, FireState};
pub use graph::{Connection, Edge, LocationFlag, LocationFlags, LocationGraph, LocationId, Weight};
pub use observer::{LocationState, NoopObserver, SimulationObserver, TickPhase, TickSnapshot};
pub use output::{render_outcome, render_snapshot, render_summary};
pub use path::{distances_from, path, path_length, Cost, Route, ShortestPathTree};
pub use simulation::{RunOutcome, Settlement, Simulation, SimulationState, TickReport};
pub use topology::{generate_graph, load_topology, save_topology, TopologyFile};
