use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use firebrigade_cli::commands::generate::{handle_generate, GenerateArgs};
use firebrigade_cli::commands::simulate::{handle_simulate, SimulateArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Wildfire spread and fire brigade dispatch simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a fire and run brigades until nothing burns.
    Simulate(SimulateArgs),
    /// Write a randomly generated topology as JSON.
    Generate(GenerateArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(args) => handle_simulate(&args),
        Command::Generate(args) => handle_generate(&args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
