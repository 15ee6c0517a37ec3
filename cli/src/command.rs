//! Line-oriented command grammar for the terminal scoreboard.
//!
//! One command per line. Blank lines and `#` comments are skipped. Team
//! letters are case-insensitive.

use scoreboard::controller::DisplayedNames;
use scoreboard::state::Team;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument { command: &'static str, what: &'static str },
    #[error("`{0}` is not a team (expected a or b)")]
    InvalidTeam(String),
    #[error("`{0}` is not a valid point count")]
    InvalidDelta(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Score { team: Team, delta: i32 },
    Undo,
    Swap,
    Serve(Team),
    Toss,
    Reset,
    Close,
    Rename { team: Team, names: DisplayedNames },
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  a+ | a- | b+ | b-      point for / correction against a team (a+3 adds three)
  undo                   rewind the last action
  swap                   change ends
  serve a|b              hand the serve to a team
  toss                   pick the serving team at random
  reset                  new game, names kept (undoable)
  close                  dismiss the winner banner and start over
  rename a|b TEAM|EVEN|ODD
                         set names as shown; EVEN/ODD are the players in those courts
  show                   redraw the scoreboard
  help                   this text
  quit                   leave";

/// Parse one input line. `Ok(None)` means there was nothing to do.
///
/// # Errors
///
/// Returns [`ParseError`] for unknown commands or malformed arguments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "undo" | "u" => Command::Undo,
        "swap" => Command::Swap,
        "toss" => Command::Toss,
        "reset" => Command::Reset,
        "close" => Command::Close,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "serve" => Command::Serve(parse_team(required(rest, "serve", "a team")?)?),
        "rename" => parse_rename(rest)?,
        other => parse_score(other).ok_or_else(|| ParseError::Unknown(other.to_owned()))??,
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, command: &'static str, what: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

fn parse_team(raw: &str) -> Result<Team, ParseError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "a" => Ok(Team::A),
        "b" => Ok(Team::B),
        _ => Err(ParseError::InvalidTeam(raw.trim().to_owned())),
    }
}

/// `a+`, `b-`, `a+3`. `None` when the token does not look like a score at all.
fn parse_score(token: &str) -> Option<Result<Command, ParseError>> {
    let mut chars = token.chars();
    let team = match chars.next()? {
        'a' => Team::A,
        'b' => Team::B,
        _ => return None,
    };
    let sign = match chars.next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };

    let digits = chars.as_str();
    if digits.is_empty() {
        return Some(Ok(Command::Score { team, delta: sign }));
    }
    Some(match digits.parse::<i32>() {
        Ok(points) if points > 0 => Ok(Command::Score { team, delta: sign * points }),
        _ => Err(ParseError::InvalidDelta(token.to_owned())),
    })
}

fn parse_rename(rest: &str) -> Result<Command, ParseError> {
    let rest = required(rest, "rename", "a team and TEAM|EVEN|ODD")?;
    let (team_raw, names_raw) = rest
        .split_once(char::is_whitespace)
        .ok_or(ParseError::MissingArgument { command: "rename", what: "TEAM|EVEN|ODD" })?;
    let team = parse_team(team_raw)?;

    let mut parts = names_raw.split('|').map(str::trim);
    let team_name = parts.next().unwrap_or_default();
    let even_player = parts.next().unwrap_or_default();
    if team_name.is_empty() || even_player.is_empty() {
        return Err(ParseError::MissingArgument { command: "rename", what: "TEAM|EVEN|ODD" });
    }
    let odd_player = parts.next().filter(|name| !name.is_empty()).map(str::to_owned);

    Ok(Command::Rename {
        team,
        names: DisplayedNames {
            team: team_name.to_owned(),
            even_player: even_player.to_owned(),
            odd_player,
        },
    })
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
