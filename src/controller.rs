//! Match controller: the action surface a view drives.
//!
//! DESIGN
//! ======
//! Every mutating action follows the same shape: validate, snapshot the
//! pre-mutation state onto the undo stack, mutate, evaluate, render. A
//! rejected action returns an [`ActionError`] before the snapshot is taken,
//! so it leaves no trace in either the state or the history and produces no
//! render. Nothing here panics; the view may ignore errors entirely and the
//! scoreboard simply stays as it was.
//!
//! Reset is undoable in both formats: it pushes a snapshot like any other
//! mutation. Manual decrements adjust the score only and never try to
//! reverse the court swap a previous point may have caused; undo is the
//! correction path that restores positions exactly.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::MatchSetup;
use crate::consts::MAX_SCORE;
use crate::history::History;
use crate::rotation::{self, RallyEffect};
use crate::state::{Format, MatchState, Team};
use crate::view::{MatchId, Phase, RenderState, View};
use crate::win::evaluate;

// =============================================================================
// ERRORS
// =============================================================================

/// Broad class of a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The action is not valid from the current state.
    InvalidTransition,
    /// Undo with nothing to undo.
    EmptyHistory,
}

/// Why an action was ignored. The state is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("match is over; undo or reset to continue")]
    MatchEnded,
    #[error("match is still in progress")]
    NotEnded,
    #[error("team {team} cannot go below zero")]
    NegativeScore { team: Team },
    #[error("team {team} cannot exceed {max} points")]
    ScoreCapped { team: Team, max: u32 },
    #[error("a score change of zero does nothing")]
    ZeroDelta,
    #[error("team {team} is already serving")]
    AlreadyServing { team: Team },
    #[error("nothing to undo")]
    EmptyHistory,
}

impl ActionError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyHistory => ErrorKind::EmptyHistory,
            _ => ErrorKind::InvalidTransition,
        }
    }
}

// =============================================================================
// NAME EDITS
// =============================================================================

/// Names as they appear in the view's inputs when editing finishes.
///
/// Player names are keyed by the court they are displayed in, not by slot:
/// the even-court input belongs to whoever currently stands in the even court.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedNames {
    pub team: String,
    pub even_player: String,
    /// Ignored in singles.
    pub odd_player: Option<String>,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct MatchController<V: View> {
    id: MatchId,
    state: MatchState,
    history: History,
    view: V,
}

impl<V: View> MatchController<V> {
    /// Start a new match at 0-0 with team A serving.
    #[must_use]
    pub fn new(setup: &MatchSetup, view: V) -> Self {
        Self::with_id(Uuid::new_v4(), setup, view)
    }

    #[must_use]
    pub fn with_id(id: MatchId, setup: &MatchSetup, view: V) -> Self {
        info!(match_id = %id, format = ?setup.format, "match created");
        Self { id, state: MatchState::new(setup), history: History::new(), view }
    }

    // --- Queries ---

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.state.ended { Phase::Ended } else { Phase::InProgress }
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState::from_state(self.id, &self.state)
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Push the current state to the view without changing anything.
    pub fn refresh(&mut self) {
        self.render();
    }

    // --- Actions ---

    /// Add `delta` points to `team`. A positive delta is a won rally and runs
    /// the court-swap rule once; a negative delta is a manual correction.
    ///
    /// # Errors
    ///
    /// Rejected when the match has ended, the delta is zero, or the result
    /// would leave `0..=MAX_SCORE`.
    pub fn score(&mut self, team: Team, delta: i32) -> Result<(), ActionError> {
        if self.state.ended {
            return self.reject(ActionError::MatchEnded);
        }
        if delta == 0 {
            return self.reject(ActionError::ZeroDelta);
        }
        let Some(next) = self.state.score(team).checked_add_signed(delta) else {
            return self.reject(ActionError::NegativeScore { team });
        };
        if next > MAX_SCORE {
            return self.reject(ActionError::ScoreCapped { team, max: MAX_SCORE });
        }

        self.checkpoint();
        if delta > 0 {
            let effect = rotation::award_rally(&mut self.state, team);
            if effect == RallyEffect::SideOut {
                debug!(match_id = %self.id, %team, "side out");
            }
        }
        self.state.set_score(team, next);
        debug!(match_id = %self.id, %team, delta, score_a = self.state.score_a, score_b = self.state.score_b, "score");

        if let Some(winner) = evaluate(self.state.score_a, self.state.score_b).winner {
            self.state.ended = true;
            info!(
                match_id = %self.id,
                %winner,
                score_a = self.state.score_a,
                score_b = self.state.score_b,
                "match won"
            );
        }

        self.render();
        Ok(())
    }

    /// Rewind the most recent mutation. Always resumes play.
    ///
    /// # Errors
    ///
    /// [`ActionError::EmptyHistory`] when there is nothing to undo.
    pub fn undo(&mut self) -> Result<(), ActionError> {
        let Some(snapshot) = self.history.pop() else {
            return self.reject(ActionError::EmptyHistory);
        };
        self.state.restore(snapshot);
        debug!(match_id = %self.id, remaining = self.history.len(), "undo");
        self.render();
        Ok(())
    }

    /// Start over at 0-0 with team A serving and everyone back in their
    /// starting courts. Names are kept. Undoable.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the action surface uniform.
    pub fn reset(&mut self) -> Result<(), ActionError> {
        self.checkpoint();
        self.state.clear_scores();
        info!(match_id = %self.id, "match reset");
        self.render();
        Ok(())
    }

    /// Dismiss the end-of-match display and reset.
    ///
    /// # Errors
    ///
    /// [`ActionError::NotEnded`] while the match is still in progress.
    pub fn close_and_reset(&mut self) -> Result<(), ActionError> {
        if !self.state.ended {
            return self.reject(ActionError::NotEnded);
        }
        self.reset()
    }

    /// Teams change ends: every team-scoped field moves across together.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn swap_sides(&mut self) -> Result<(), ActionError> {
        self.checkpoint();
        self.state.swap_teams();
        debug!(match_id = %self.id, "sides swapped");
        self.render();
        Ok(())
    }

    /// Manually hand the serve to `team` without touching scores or courts.
    ///
    /// # Errors
    ///
    /// [`ActionError::AlreadyServing`] if `team` already serves.
    pub fn set_server(&mut self, team: Team) -> Result<(), ActionError> {
        if self.state.serving == team {
            return self.reject(ActionError::AlreadyServing { team });
        }
        self.checkpoint();
        self.state.serving = team;
        debug!(match_id = %self.id, %team, "server set");
        self.render();
        Ok(())
    }

    /// Commit names edited in the view for both teams. Cosmetic: not undoable
    /// and allowed in any phase.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn rename_applied(&mut self, a: DisplayedNames, b: DisplayedNames) -> Result<(), ActionError> {
        self.apply_names(Team::A, a);
        self.apply_names(Team::B, b);
        info!(
            match_id = %self.id,
            team_a = %self.state.side_a.name,
            team_b = %self.state.side_b.name,
            "names updated"
        );
        self.render();
        Ok(())
    }

    /// The displayed names for `team` as a view would prefill its inputs.
    #[must_use]
    pub fn displayed_names(&self, team: Team) -> DisplayedNames {
        let side = self.state.side(team);
        let (even_player, odd_player) = side.court_names(self.state.format);
        DisplayedNames {
            team: side.name.clone(),
            even_player: even_player.to_owned(),
            odd_player: odd_player.map(str::to_owned),
        }
    }

    // --- Internals ---

    fn apply_names(&mut self, team: Team, names: DisplayedNames) {
        let format = self.state.format;
        let side = self.state.side_mut(team);
        side.name = names.team;

        let even_slot = side.even_slot(format);
        side.players[even_slot.index()] = names.even_player;
        if format == Format::Doubles {
            if let Some(odd_player) = names.odd_player {
                side.players[even_slot.other().index()] = odd_player;
            }
        }
    }

    fn checkpoint(&mut self) {
        self.history.push(self.state.snapshot());
    }

    fn reject(&self, error: ActionError) -> Result<(), ActionError> {
        debug!(match_id = %self.id, %error, "action ignored");
        Err(error)
    }

    fn render(&mut self) {
        let frame = self.render_state();
        self.view.render(&frame);
    }
}
