//! Generate command handler: write a random topology as JSON.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use firebrigade_lib::{generate_graph, save_topology, topology::DEFAULT_MAX_WEIGHT, TopologyFile};

/// Arguments for the `generate` command.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of locations.
    #[arg(long)]
    pub locations: usize,
    /// Number of connections.
    #[arg(long)]
    pub connections: usize,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Largest connection weight.
    #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
    pub max_weight: u32,
    /// File to write; stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn handle_generate(args: &GenerateArgs) -> Result<()> {
    let stdout = io::stdout();
    write_topology(args, stdout.lock())
}

/// Generate the topology and write it to `--output`, or to `out` when no
/// file was given.
pub fn write_topology<W: Write>(args: &GenerateArgs, mut out: W) -> Result<()> {
    let graph = generate_graph(args.locations, args.connections, args.max_weight, args.seed)
        .context("failed to generate the topology")?;

    match &args.output {
        Some(path) => {
            save_topology(&graph, path)
                .with_context(|| format!("failed to write topology to {}", path.display()))?;
            writeln!(
                out,
                "Wrote {} locations and {} connections to {}",
                graph.len(),
                graph.connection_count(),
                path.display()
            )?;
        }
        None => {
            serde_json::to_writer_pretty(&mut out, &TopologyFile::from_graph(&graph))?;
            writeln!(out)?;
        }
    }
    Ok(())
}
