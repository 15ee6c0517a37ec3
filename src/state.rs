//! Match state: teams, sides, service courts, and the mutable score record.
//!
//! DESIGN
//! ======
//! Court occupancy is stored explicitly per side: the player pair never
//! reorders, and `even_court` names the slot standing in the even service
//! court. The odd court is always `even_court.other()`. Everything the undo
//! stack needs to rewind lives in [`Snapshot`], a plain value copy; the
//! `ended` flag is deliberately outside it because restoring always resumes
//! play.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MatchSetup;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// One of the two sides of the net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Team {
    A,
    B,
}

impl Team {
    /// Both teams, A first.
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// The team across the net.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Position of a player within their side's pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    #[default]
    First,
    Second,
}

impl Slot {
    /// The partner's slot.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Array index into a player pair.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Service court on one side of the net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Court {
    /// Right-hand court; serves from here on an even score.
    Even,
    /// Left-hand court; serves from here on an odd score.
    Odd,
}

impl Court {
    /// The court a server stands in for the given score.
    #[must_use]
    pub fn for_score(score: u32) -> Self {
        if score % 2 == 0 { Self::Even } else { Self::Odd }
    }
}

/// Singles or doubles play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One player per side; only [`Slot::First`] is meaningful.
    Singles,
    /// Two players per side with positional serving.
    #[default]
    Doubles,
}

// =============================================================================
// SIDE
// =============================================================================

/// A team's display name, its players, and who stands where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    pub name: String,
    pub players: [String; 2],
    /// Slot currently standing in the even court.
    pub even_court: Slot,
}

impl Side {
    #[must_use]
    pub fn new(name: impl Into<String>, players: [String; 2]) -> Self {
        Self { name: name.into(), players, even_court: Slot::First }
    }

    /// Name of the player in `slot`.
    #[must_use]
    pub fn player(&self, slot: Slot) -> &str {
        &self.players[slot.index()]
    }

    /// Slot currently standing in `court`.
    #[must_use]
    pub fn slot_in(&self, court: Court) -> Slot {
        match court {
            Court::Even => self.even_court,
            Court::Odd => self.even_court.other(),
        }
    }

    /// Name of the player currently standing in `court`.
    #[must_use]
    pub fn player_in(&self, court: Court) -> &str {
        self.player(self.slot_in(court))
    }

    /// Names as displayed: the even-court player, then the odd-court player
    /// in doubles. Singles shows its one player regardless of court.
    #[must_use]
    pub fn court_names(&self, format: Format) -> (&str, Option<&str>) {
        match format {
            Format::Singles => (self.player(Slot::First), None),
            Format::Doubles => (self.player_in(Court::Even), Some(self.player_in(Court::Odd))),
        }
    }

    /// Slot an edited even-court name is written back to.
    #[must_use]
    pub fn even_slot(&self, format: Format) -> Slot {
        match format {
            Format::Singles => Slot::First,
            Format::Doubles => self.even_court,
        }
    }

    /// The two players trade service courts.
    pub fn swap_courts(&mut self) {
        self.even_court = self.even_court.other();
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Value copy of every undoable field. Taken before the mutation it reverses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub score_a: u32,
    pub score_b: u32,
    pub side_a: Side,
    pub side_b: Side,
    pub serving: Team,
}

// =============================================================================
// MATCH STATE
// =============================================================================

/// Mutable record of one match in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub format: Format,
    pub score_a: u32,
    pub score_b: u32,
    pub side_a: Side,
    pub side_b: Side,
    pub serving: Team,
    pub ended: bool,
}

impl MatchState {
    /// Fresh 0-0 state with team A serving and first players in the even court.
    #[must_use]
    pub fn new(setup: &MatchSetup) -> Self {
        Self {
            format: setup.format,
            score_a: 0,
            score_b: 0,
            side_a: Side::new(setup.team_a.clone(), setup.players_a.clone()),
            side_b: Side::new(setup.team_b.clone(), setup.players_b.clone()),
            serving: Team::A,
            ended: false,
        }
    }

    #[must_use]
    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::A => self.score_a,
            Team::B => self.score_b,
        }
    }

    pub fn set_score(&mut self, team: Team, value: u32) {
        match team {
            Team::A => self.score_a = value,
            Team::B => self.score_b = value,
        }
    }

    #[must_use]
    pub fn side(&self, team: Team) -> &Side {
        match team {
            Team::A => &self.side_a,
            Team::B => &self.side_b,
        }
    }

    pub fn side_mut(&mut self, team: Team) -> &mut Side {
        match team {
            Team::A => &mut self.side_a,
            Team::B => &mut self.side_b,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score_a: self.score_a,
            score_b: self.score_b,
            side_a: self.side_a.clone(),
            side_b: self.side_b.clone(),
            serving: self.serving,
        }
    }

    /// Overwrite every undoable field and resume play.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.score_a = snapshot.score_a;
        self.score_b = snapshot.score_b;
        self.side_a = snapshot.side_a;
        self.side_b = snapshot.side_b;
        self.serving = snapshot.serving;
        self.ended = false;
    }

    /// Zero the scores and put everyone back in their starting courts.
    /// Names are kept.
    pub fn clear_scores(&mut self) {
        self.score_a = 0;
        self.score_b = 0;
        self.side_a.even_court = Slot::First;
        self.side_b.even_court = Slot::First;
        self.serving = Team::A;
        self.ended = false;
    }

    /// Exchange every team-scoped field between A and B in one step.
    pub fn swap_teams(&mut self) {
        std::mem::swap(&mut self.score_a, &mut self.score_b);
        std::mem::swap(&mut self.side_a, &mut self.side_b);
        self.serving = self.serving.other();
    }
}
