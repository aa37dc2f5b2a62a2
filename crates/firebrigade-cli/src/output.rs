//! Output formatting for simulation runs.
//!
//! Text output streams one rendering per snapshot while the run progresses.
//! JSON output collects the snapshots and prints a single report at the end.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use firebrigade_lib::{
    render_outcome, render_summary, LocationId, RunOutcome, SimulationObserver, TickSnapshot,
};

use crate::terminal::ColorPalette;

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tick-by-tick text with a location map.
    #[default]
    Text,
    /// A single JSON document with every snapshot and the outcome.
    Json,
}

/// Observer that writes each snapshot as text.
///
/// The first write error stops further output and is returned by
/// [`TickPrinter::finish`].
pub struct TickPrinter<W: Write> {
    out: W,
    palette: ColorPalette,
    error: Option<io::Error>,
}

impl<W: Write> TickPrinter<W> {
    pub fn new(out: W, palette: ColorPalette) -> Self {
        Self {
            out,
            palette,
            error: None,
        }
    }

    /// Print the final report and hand back the writer.
    pub fn finish(mut self, outcome: &RunOutcome) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        writeln!(self.out, "{}", render_outcome(outcome))?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_snapshot(&mut self, snapshot: &TickSnapshot) -> io::Result<()> {
        writeln!(self.out, "{}", render_summary(snapshot))?;
        writeln!(
            self.out,
            "  map {}",
            self.palette.paint_map(&snapshot.locations)
        )
    }
}

impl<W: Write> SimulationObserver for TickPrinter<W> {
    fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_snapshot(snapshot) {
            self.error = Some(err);
        }
    }
}

/// JSON document printed by `simulate --format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub start: LocationId,
    pub locations: usize,
    pub connections: usize,
    pub brigades: usize,
    pub outcome: RunOutcome,
    pub snapshots: Vec<TickSnapshot>,
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use firebrigade_lib::{LocationState, Settlement, TickPhase};

    use super::*;

    fn snapshot() -> TickSnapshot {
        TickSnapshot {
            tick: 0,
            phase: TickPhase::Ignition,
            active_fires: BTreeSet::from([1]),
            burned: BTreeSet::new(),
            brigade_positions: BTreeMap::from([(0, 0)]),
            locations: vec![LocationState::Occupied, LocationState::Burning],
        }
    }

    #[test]
    fn printer_writes_snapshot_then_outcome() {
        let mut printer = TickPrinter::new(Vec::new(), ColorPalette::plain());
        printer.on_snapshot(&snapshot());
        let outcome = RunOutcome {
            extinguished: vec![1],
            burned_out: vec![],
            ticks: 1,
            settled_by: Settlement::Extinguished,
        };

        let bytes = printer.finish(&outcome).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "[tick 0] ignition: fires [1] burned [] brigades 0@0\n  map B*\n\
             Simulation settled after 1 tick: all fires extinguished.\nExtinguished: [1]\n"
        );
    }

    #[test]
    fn json_report_names_phases_in_snake_case() {
        let report = JsonReport {
            start: 1,
            locations: 2,
            connections: 1,
            brigades: 1,
            outcome: RunOutcome {
                extinguished: vec![],
                burned_out: vec![1],
                ticks: 1,
                settled_by: Settlement::BurnedOut,
            },
            snapshots: vec![snapshot()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["settled_by"], "burned_out");
        assert_eq!(json["snapshots"][0]["phase"], "ignition");
        assert_eq!(json["snapshots"][0]["locations"][1], "burning");
    }
}
