//! Render payload and the callback seam to the presentation layer.
//!
//! The controller never touches presentation. After every successful action
//! it builds a [`RenderState`] (plain, serializable data) and hands it to
//! whatever implements [`View`]. Which widget shows what, and whether name
//! inputs are editable, is entirely the view's business.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rotation::{current_server_name, server_court};
use crate::state::{Court, Format, MatchState, Team};
use crate::win::evaluate;

/// Identifier distinguishing independent matches driven by one host.
pub type MatchId = Uuid;

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InProgress,
    Ended,
}

/// End-of-match summary for the winner display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Team,
    pub winner_name: String,
    pub score_a: u32,
    pub score_b: u32,
}

/// One side as the view should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideView {
    pub name: String,
    pub score: u32,
    /// Player standing in the even (right) court.
    pub even_player: String,
    /// Player standing in the odd (left) court. Absent in singles.
    pub odd_player: Option<String>,
}

/// Everything a view needs to redraw the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderState {
    pub match_id: MatchId,
    pub format: Format,
    pub side_a: SideView,
    pub side_b: SideView,
    pub serving: Team,
    pub server_name: String,
    pub server_court: Court,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl RenderState {
    /// Derive the render payload from the current match state.
    #[must_use]
    pub fn from_state(match_id: MatchId, state: &MatchState) -> Self {
        let phase = if state.ended { Phase::Ended } else { Phase::InProgress };
        let outcome = if state.ended { outcome_of(state) } else { None };

        Self {
            match_id,
            format: state.format,
            side_a: side_view(state, Team::A),
            side_b: side_view(state, Team::B),
            serving: state.serving,
            server_name: current_server_name(state, state.serving).to_owned(),
            server_court: server_court(state, state.serving),
            phase,
            outcome,
        }
    }

    #[must_use]
    pub fn side(&self, team: Team) -> &SideView {
        match team {
            Team::A => &self.side_a,
            Team::B => &self.side_b,
        }
    }
}

fn side_view(state: &MatchState, team: Team) -> SideView {
    let side = state.side(team);
    let (even_player, odd_player) = side.court_names(state.format);
    SideView {
        name: side.name.clone(),
        score: state.score(team),
        even_player: even_player.to_owned(),
        odd_player: odd_player.map(str::to_owned),
    }
}

fn outcome_of(state: &MatchState) -> Option<Outcome> {
    let winner = evaluate(state.score_a, state.score_b).winner?;
    Some(Outcome {
        winner,
        winner_name: state.side(winner).name.clone(),
        score_a: state.score_a,
        score_b: state.score_b,
    })
}

/// Presentation collaborator notified after every successful mutation.
pub trait View {
    fn render(&mut self, state: &RenderState);
}

impl<F> View for F
where
    F: FnMut(&RenderState),
{
    fn render(&mut self, state: &RenderState) {
        self(state);
    }
}

/// View that remembers every render it receives. Handy for headless hosts
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub frames: Vec<RenderState>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last(&self) -> Option<&RenderState> {
        self.frames.last()
    }
}

impl View for RecordingView {
    fn render(&mut self, state: &RenderState) {
        self.frames.push(state.clone());
    }
}
