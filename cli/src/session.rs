//! Dispatch parsed commands onto a match controller.

use rand::Rng;
use scoreboard::controller::{ActionError, MatchController};
use scoreboard::state::Team;
use scoreboard::view::View;

use crate::command::Command;

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Help,
    Quit,
}

pub struct Session<V: View> {
    controller: MatchController<V>,
}

impl<V: View> Session<V> {
    #[must_use]
    pub fn new(controller: MatchController<V>) -> Self {
        Self { controller }
    }

    #[must_use]
    pub fn controller(&self) -> &MatchController<V> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MatchController<V> {
        &mut self.controller
    }

    /// Run one command against the match.
    ///
    /// # Errors
    ///
    /// Passes through the controller's [`ActionError`] when the action was
    /// ignored.
    pub fn execute<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) -> Result<Flow, ActionError> {
        let ctl = &mut self.controller;
        match command {
            Command::Score { team, delta } => ctl.score(team, delta)?,
            Command::Undo => ctl.undo()?,
            Command::Swap => ctl.swap_sides()?,
            Command::Serve(team) => ctl.set_server(team)?,
            Command::Toss => {
                let team = if rng.random_bool(0.5) { Team::A } else { Team::B };
                tracing::info!(match_id = %ctl.id(), %team, "coin toss");
                if ctl.state().serving == team {
                    ctl.refresh();
                } else {
                    ctl.set_server(team)?;
                }
            }
            Command::Reset => ctl.reset()?,
            Command::Close => ctl.close_and_reset()?,
            Command::Rename { team, names } => {
                let other = ctl.displayed_names(team.other());
                let (a, b) = match team {
                    Team::A => (names, other),
                    Team::B => (other, names),
                };
                ctl.rename_applied(a, b)?;
            }
            Command::Show => ctl.refresh(),
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
