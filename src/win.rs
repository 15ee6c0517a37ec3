//! Win evaluation.

#[cfg(test)]
#[path = "win_test.rs"]
mod win_test;

use crate::consts::{MAX_SCORE, WIN_MARGIN, WINNING_SCORE};
use crate::state::Team;

/// Result of evaluating a score line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Option<Team>,
}

impl Verdict {
    #[must_use]
    pub fn is_over(self) -> bool {
        self.winner.is_some()
    }
}

/// Decide whether either side has won.
///
/// Nobody wins below [`WINNING_SCORE`]. Reaching [`MAX_SCORE`] wins outright
/// even on a one-point lead; otherwise a lead of [`WIN_MARGIN`] is required.
#[must_use]
pub fn evaluate(score_a: u32, score_b: u32) -> Verdict {
    let winner = if score_a.max(score_b) < WINNING_SCORE {
        None
    } else if score_a == MAX_SCORE {
        Some(Team::A)
    } else if score_b == MAX_SCORE {
        Some(Team::B)
    } else if score_a.abs_diff(score_b) >= WIN_MARGIN {
        Some(if score_a > score_b { Team::A } else { Team::B })
    } else {
        None
    };
    Verdict { winner }
}
