//! Terminal styling and color detection.
//!
//! The map line of a tick rendering can be colored per location state. Color
//! is skipped when `NO_COLOR` is set or `TERM=dumb`.

use firebrigade_lib::LocationState;

/// ANSI escape codes used by the map renderer.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold red for burning locations.
    pub const RED_BOLD: &str = "\x1b[1;31m";
    /// Yellow for locations holding a brigade.
    pub const YELLOW: &str = "\x1b[33m";
    /// Blue for water points and stations.
    pub const BLUE: &str = "\x1b[34m";
    /// Gray for burned locations.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for untouched locations.
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub burning: &'static str,
    pub occupied: &'static str,
    pub water: &'static str,
    pub burned: &'static str,
    pub safe: &'static str,
}

impl ColorPalette {
    pub fn colored() -> Self {
        Self {
            reset: colors::RESET,
            burning: colors::RED_BOLD,
            occupied: colors::YELLOW,
            water: colors::BLUE,
            burned: colors::GRAY,
            safe: colors::GREEN,
        }
    }

    pub fn plain() -> Self {
        Self {
            reset: "",
            burning: "",
            occupied: "",
            water: "",
            burned: "",
            safe: "",
        }
    }

    /// Pick a palette from the environment.
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn for_state(&self, state: LocationState) -> &'static str {
        match state {
            LocationState::Burning => self.burning,
            LocationState::Occupied => self.occupied,
            LocationState::Water => self.water,
            LocationState::Burned => self.burned,
            LocationState::Safe => self.safe,
        }
    }

    /// Render one symbol per location, wrapping each in its color.
    pub fn paint_map(&self, states: &[LocationState]) -> String {
        let mut map = String::with_capacity(states.len());
        for &state in states {
            map.push_str(self.for_state(state));
            map.push(state.symbol());
            map.push_str(self.reset);
        }
        map
    }
}

/// Check if the terminal supports ANSI colors.
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
