//! Movement modes.

use serde::{Deserialize, Serialize};

/// Movement mode a test (or a lifetime stat column group) is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Moving allowed ("all-time" in the UI).
    All,
    /// No move.
    Nm,
    /// No move, no pan, no zoom.
    Nmpz,
}

impl Mode {
    pub const ALL_MODES: [Mode; 3] = [Mode::All, Mode::Nm, Mode::Nmpz];

    /// Column prefix used by the PLAYER_CARD export.
    pub fn column_prefix(&self) -> &'static str {
        match self {
            Mode::All => "OVERALL",
            Mode::Nm => "NM",
            Mode::Nmpz => "NMPZ",
        }
    }

    /// Key used by the precompute blob and query strings.
    pub fn key(&self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::Nm => "nm",
            Mode::Nmpz => "nmpz",
        }
    }

    /// Human label ("All-time" / "NM" / "NMPZ").
    pub fn label(&self) -> &'static str {
        match self {
            Mode::All => "All-time",
            Mode::Nm => "NM",
            Mode::Nmpz => "NMPZ",
        }
    }

    pub fn parse(s: &str) -> Option<Mode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "overall" | "moving" => Some(Mode::All),
            "nm" => Some(Mode::Nm),
            "nmpz" => Some(Mode::Nmpz),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Mode used when selecting a player's comparable test history.
///
/// NMPZ tests with a 10 second timer score so differently from untimed NMPZ
/// that they form their own sub-mode for improvement tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    All,
    Nm,
    Nmpz,
    Nmpz10,
}

impl HistoryMode {
    /// Classify a test by its mode string and time limit in seconds.
    pub fn classify(mode: &str, time_limit: u32) -> Option<HistoryMode> {
        match Mode::parse(mode)? {
            Mode::All => Some(HistoryMode::All),
            Mode::Nm => Some(HistoryMode::Nm),
            Mode::Nmpz if time_limit == 10 => Some(HistoryMode::Nmpz10),
            Mode::Nmpz => Some(HistoryMode::Nmpz),
        }
    }
}

/// A value held once per movement mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeMap<T> {
    pub all: T,
    pub nm: T,
    pub nmpz: T,
}

impl<T> ModeMap<T> {
    pub fn get(&self, mode: Mode) -> &T {
        match mode {
            Mode::All => &self.all,
            Mode::Nm => &self.nm,
            Mode::Nmpz => &self.nmpz,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut T {
        match mode {
            Mode::All => &mut self.all,
            Mode::Nm => &mut self.nm,
            Mode::Nmpz => &mut self.nmpz,
        }
    }
}
