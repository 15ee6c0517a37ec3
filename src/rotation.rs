//! Positional serving.
//!
//! The court a player stands in, not who they are, decides who serves: on an
//! even team score the even-court player serves, on an odd score the
//! odd-court player does. Players only change courts when their own side wins
//! a rally it was already serving. A side-out hands the serve across the net
//! and moves nobody.

#[cfg(test)]
#[path = "rotation_test.rs"]
mod rotation_test;

use crate::state::{Court, Format, MatchState, Slot, Team};

/// What a won rally did to service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RallyEffect {
    /// The serving side scored; its players traded courts (doubles only).
    ServeHeld,
    /// The receiving side scored and takes over service.
    SideOut,
}

/// Court the current server of `team` serves from.
#[must_use]
pub fn server_court(state: &MatchState, team: Team) -> Court {
    Court::for_score(state.score(team))
}

/// Slot of the player who serves for `team` at its current score.
#[must_use]
pub fn current_server(state: &MatchState, team: Team) -> Slot {
    match state.format {
        Format::Singles => Slot::First,
        Format::Doubles => state.side(team).slot_in(server_court(state, team)),
    }
}

/// Name of the player who serves for `team` at its current score.
#[must_use]
pub fn current_server_name(state: &MatchState, team: Team) -> &str {
    state.side(team).player(current_server(state, team))
}

/// Apply the court-swap rule for a rally won by `scorer`.
///
/// Call before the score itself is incremented. Decrements must not come
/// through here: rotation is not reversed on manual corrections.
pub fn award_rally(state: &mut MatchState, scorer: Team) -> RallyEffect {
    if state.serving == scorer {
        if state.format == Format::Doubles {
            state.side_mut(scorer).swap_courts();
        }
        RallyEffect::ServeHeld
    } else {
        state.serving = scorer;
        RallyEffect::SideOut
    }
}
