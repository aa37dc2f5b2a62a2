//! Simulate command handler: build a simulation, run it from a start
//! location and print the ticks and the outcome.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use firebrigade_lib::{load_topology, LocationId, Simulation, SimulationConfig, TickSnapshot};

use crate::output::{JsonReport, OutputFormat, TickPrinter};
use crate::terminal::ColorPalette;

/// Arguments for the `simulate` command.
///
/// Values given on the command line override the same fields of `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct SimulateArgs {
    /// JSON simulation config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// JSON topology file to run on instead of generating a graph.
    #[arg(long)]
    pub topology: Option<PathBuf>,
    /// Number of locations to generate.
    #[arg(long)]
    pub locations: Option<usize>,
    /// Number of connections to generate.
    #[arg(long)]
    pub connections: Option<usize>,
    /// Seed for topology generation.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Location holding a brigade station (repeatable or comma separated).
    #[arg(long = "station", value_delimiter = ',')]
    pub stations: Vec<LocationId>,
    /// Location holding water (repeatable or comma separated).
    #[arg(long = "water", value_delimiter = ',')]
    pub water: Vec<LocationId>,
    /// Water each brigade carries when full.
    #[arg(long)]
    pub capacity: Option<u32>,
    /// Water spent putting out one location.
    #[arg(long)]
    pub consumption: Option<u32>,
    /// Largest generated connection weight.
    #[arg(long)]
    pub max_weight: Option<u32>,
    /// Location where the first fire starts.
    #[arg(long)]
    pub start: LocationId,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Disable ANSI colors in the location map.
    #[arg(long)]
    pub no_color: bool,
}

impl SimulateArgs {
    /// Merge the config file, if any, with the command-line overrides.
    pub fn to_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_path(path)
                .with_context(|| format!("failed to read config from {}", path.display()))?,
            None => SimulationConfig::new(self.capacity.unwrap_or(1)),
        };

        if let Some(capacity) = self.capacity {
            config.truck_capacity = capacity;
        }
        if let Some(consumption) = self.consumption {
            config.consumption_per_fire = consumption;
        }
        if let Some(max_weight) = self.max_weight {
            config.max_weight = max_weight;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(locations) = self.locations {
            config.location_count = Some(locations);
        }
        if let Some(connections) = self.connections {
            config.connection_count = Some(connections);
        }
        Ok(config
            .with_stations(self.stations.iter().copied())
            .with_water(self.water.iter().copied()))
    }

    /// Build the simulation from the topology file or by generating a graph.
    pub fn build(&self) -> Result<Simulation> {
        let config = self.to_config()?;
        debug!(?config, "resolved simulation config");

        match &self.topology {
            Some(path) => {
                let graph = load_topology(path).with_context(|| {
                    format!("failed to load topology from {}", path.display())
                })?;
                Simulation::with_graph(graph, &config)
                    .context("failed to place stations and water on the topology")
            }
            None => Simulation::generate(&config).context("failed to generate the topology"),
        }
    }
}

/// Handle the `simulate` subcommand, writing to stdout.
pub fn handle_simulate(args: &SimulateArgs) -> Result<()> {
    let stdout = io::stdout();
    run_simulation(args, stdout.lock())
}

/// Run the simulation described by `args`, writing the rendering to `out`.
pub fn run_simulation<W: Write>(args: &SimulateArgs, mut out: W) -> Result<()> {
    let mut sim = args.build()?;
    if !sim.graph().contains(args.start) {
        anyhow::bail!(
            "start location {} is not in the graph (0..{})",
            args.start,
            sim.graph().len()
        );
    }

    match args.format {
        OutputFormat::Text => {
            let palette = if args.no_color {
                ColorPalette::plain()
            } else {
                ColorPalette::detect()
            };
            let mut printer = TickPrinter::new(out, palette);
            let outcome = sim
                .run_observed(args.start, &mut printer)
                .context("simulation failed")?;
            printer
                .finish(&outcome)
                .context("failed to write simulation output")?;
        }
        OutputFormat::Json => {
            let mut snapshots: Vec<TickSnapshot> = Vec::new();
            let mut record = |snapshot: &TickSnapshot| snapshots.push(snapshot.clone());
            let outcome = sim
                .run_observed(args.start, &mut record)
                .context("simulation failed")?;
            let report = JsonReport {
                start: args.start,
                locations: sim.graph().len(),
                connections: sim.graph().connection_count(),
                brigades: sim.brigades().len(),
                outcome,
                snapshots,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
