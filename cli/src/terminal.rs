//! Terminal view: draws each render frame as a text board or a JSON line.

use std::io::{self, Write};

use scoreboard::state::{Court, Team};
use scoreboard::view::{Phase, RenderState, SideView, View};

use crate::command::HELP;

const RULE: &str = "+------------------------------------------+";

/// [`View`] over any writer. Render cannot fail, so the first write error
/// is parked until the host collects it with [`TerminalView::take_error`].
pub struct TerminalView<W: Write> {
    out: W,
    json: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalView<W> {
    #[must_use]
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json, error: None }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Write the command help to the board. JSON output carries render
    /// frames only, so in that mode nothing is written and `false` comes back
    /// for the caller to route the text elsewhere.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn show_help(&mut self) -> io::Result<bool> {
        if self.json {
            return Ok(false);
        }
        self.out.write_all(HELP.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(true)
    }

    fn write_frame(&mut self, state: &RenderState) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, state)?;
            self.out.write_all(b"\n")?;
        } else {
            self.out.write_all(format_board(state).as_bytes())?;
        }
        self.out.flush()
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render(&mut self, state: &RenderState) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.write_frame(state) {
            self.error = Some(error);
        }
    }
}

/// Text board for one frame. The serving side is marked with `*` and the
/// server's name with `>`.
#[must_use]
pub fn format_board(state: &RenderState) -> String {
    let mut board = String::new();
    board.push_str(RULE);
    board.push('\n');
    for team in Team::ALL {
        push_side(&mut board, state, team);
    }
    board.push_str(RULE);
    board.push('\n');

    let court = match state.server_court {
        Court::Even => "even",
        Court::Odd => "odd",
    };
    board.push_str(&format!("  serving: {} from the {court} court\n", state.server_name));

    if state.phase == Phase::Ended {
        if let Some(outcome) = &state.outcome {
            board.push_str(&format!(
                "  *** {} wins {}-{} ***  (close, reset or undo)\n",
                outcome.winner_name, outcome.score_a, outcome.score_b
            ));
        }
    }
    board
}

fn push_side(board: &mut String, state: &RenderState, team: Team) {
    let side: &SideView = state.side(team);
    let marker = if state.serving == team { '*' } else { ' ' };
    board.push_str(&format!("{marker} {team} {:<28} {:>3}\n", side.name, side.score));

    let even = tag(state, team, Court::Even, &side.even_player);
    let line = match &side.odd_player {
        Some(odd) => {
            let odd = tag(state, team, Court::Odd, odd);
            format!("      odd: {odd:<16} even: {even}\n")
        }
        None => format!("      {even}\n"),
    };
    board.push_str(&line);
}

/// Prefix the player serving from `court` with `>`. Singles has one player,
/// listed under the even column whichever court they serve from.
fn tag(state: &RenderState, team: Team, court: Court, player: &str) -> String {
    let serves_here = match &state.side(team).odd_player {
        Some(_) => state.server_court == court,
        None => true,
    };
    if state.serving == team && serves_here {
        format!(">{player}")
    } else {
        player.to_owned()
    }
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;
