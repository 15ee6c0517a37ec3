//! Shared constants for the scoreboard crate.

// ── Rules ───────────────────────────────────────────────────────

/// Points needed before a game can be won.
pub const WINNING_SCORE: u32 = 21;

/// Lead required to win once a side has reached [`WINNING_SCORE`].
pub const WIN_MARGIN: u32 = 2;

/// Hard cap. Reaching it wins outright regardless of the margin.
pub const MAX_SCORE: u32 = 30;

// ── Undo ────────────────────────────────────────────────────────

/// Maximum number of snapshots retained; older ones are evicted first.
pub const HISTORY_DEPTH: usize = 50;

// ── Default identities ──────────────────────────────────────────

pub const DEFAULT_TEAM_A: &str = "Team A";
pub const DEFAULT_TEAM_B: &str = "Team B";
pub const DEFAULT_PLAYERS_A: [&str; 2] = ["A1", "A2"];
pub const DEFAULT_PLAYERS_B: [&str; 2] = ["B1", "B2"];
