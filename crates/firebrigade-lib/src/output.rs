use std::fmt::Write;

use crate::observer::{TickPhase, TickSnapshot};
use crate::simulation::{RunOutcome, Settlement};

impl TickPhase {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            TickPhase::Ignition => "ignition",
            TickPhase::BeforeDispatch => "before dispatch",
            TickPhase::AfterDispatch => "after dispatch",
        }
    }
}

impl Settlement {
    pub fn label(self) -> &'static str {
        match self {
            Settlement::Extinguished => "all fires extinguished",
            Settlement::BurnedOut => "remaining fires burned out",
            Settlement::NeverIgnited => "start location could not ignite",
        }
    }
}

/// Render a snapshot as two lines: [`render_summary`] and a
/// one-character-per-location map.
pub fn render_snapshot(snapshot: &TickSnapshot) -> String {
    let map: String = snapshot.locations.iter().map(|state| state.symbol()).collect();
    format!("{}\n  map {}", render_summary(snapshot), map)
}

/// One-line summary of a snapshot: tick, phase, fires, burned locations and
/// brigade positions.
pub fn render_summary(snapshot: &TickSnapshot) -> String {
    let mut buffer = String::new();
    let _ = write!(
        buffer,
        "[tick {}] {}: fires {}",
        snapshot.tick,
        snapshot.phase.label(),
        format_ids(snapshot.active_fires.iter().copied())
    );
    let _ = write!(
        buffer,
        " burned {}",
        format_ids(snapshot.burned.iter().copied())
    );
    let brigades = snapshot
        .brigade_positions
        .iter()
        .map(|(brigade, location)| format!("{}@{}", brigade, location))
        .collect::<Vec<_>>()
        .join(" ");
    if !brigades.is_empty() {
        let _ = write!(buffer, " brigades {}", brigades);
    }
    buffer
}

/// Render the final report of a run.
pub fn render_outcome(outcome: &RunOutcome) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Simulation settled after {} tick{}: {}.",
        outcome.ticks,
        if outcome.ticks == 1 { "" } else { "s" },
        outcome.settled_by.label()
    );
    let _ = write!(
        buffer,
        "Extinguished: {}",
        format_ids(outcome.sorted_extinguished())
    );
    if !outcome.burned_out.is_empty() {
        let mut burned = outcome.burned_out.clone();
        burned.sort_unstable();
        let _ = write!(buffer, "\nBurned out: {}", format_ids(burned));
    }
    buffer
}

fn format_ids<I>(ids: I) -> String
where
    I: IntoIterator<Item = usize>,
{
    let joined = ids
        .into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}
