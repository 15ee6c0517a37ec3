//! Match setup: format and identities, with environment overrides.

use std::collections::HashMap;
use std::env::VarError;

use crate::consts::{DEFAULT_PLAYERS_A, DEFAULT_PLAYERS_B, DEFAULT_TEAM_A, DEFAULT_TEAM_B};
use crate::state::Format;

pub const ENV_FORMAT: &str = "SCOREBOARD_FORMAT";
pub const ENV_TEAM_A: &str = "SCOREBOARD_TEAM_A";
pub const ENV_TEAM_B: &str = "SCOREBOARD_TEAM_B";
pub const ENV_PLAYERS_A: &str = "SCOREBOARD_PLAYERS_A";
pub const ENV_PLAYERS_B: &str = "SCOREBOARD_PLAYERS_B";

/// Every variable [`MatchSetup::from_env`] reads.
pub const ENV_VARS: [&str; 5] = [ENV_FORMAT, ENV_TEAM_A, ENV_TEAM_B, ENV_PLAYERS_A, ENV_PLAYERS_B];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown match format '{0}' (expected 'doubles' or 'singles')")]
    UnknownFormat(String),
    #[error("{var}: expected {expected} player name(s), got {got}")]
    PlayerCount { var: String, expected: usize, got: usize },
    #[error("{var}: names must not be blank")]
    BlankName { var: String },
    #[error("{var} is set but is not valid UTF-8")]
    NotUnicode { var: String },
}

/// Everything needed to start a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    pub format: Format,
    pub team_a: String,
    pub team_b: String,
    /// Singles keeps the second name as an unused placeholder.
    pub players_a: [String; 2],
    pub players_b: [String; 2],
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            format: Format::Doubles,
            team_a: DEFAULT_TEAM_A.to_owned(),
            team_b: DEFAULT_TEAM_B.to_owned(),
            players_a: DEFAULT_PLAYERS_A.map(str::to_owned),
            players_b: DEFAULT_PLAYERS_B.map(str::to_owned),
        }
    }
}

impl MatchSetup {
    /// Build a setup from process environment variables.
    ///
    /// Optional:
    /// - `SCOREBOARD_FORMAT`: `doubles` (default) or `singles`
    /// - `SCOREBOARD_TEAM_A` / `SCOREBOARD_TEAM_B`: team display names
    /// - `SCOREBOARD_PLAYERS_A` / `SCOREBOARD_PLAYERS_B`: comma-separated
    ///   player names, two for doubles and one for singles
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown format, a wrong number of
    /// player names, a blank name, or a value that is not valid UTF-8.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|_| None)
    }

    /// Like [`MatchSetup::from_env`], but a `Some` from `overrides` wins over
    /// the process environment for that variable.
    ///
    /// # Errors
    ///
    /// See [`MatchSetup::from_env`].
    pub fn from_env_with<F>(overrides: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = HashMap::new();
        for var in ENV_VARS {
            let value = match overrides(var) {
                Some(value) => Some(value),
                None => read_env(var)?,
            };
            if let Some(value) = value {
                values.insert(var, value);
            }
        }
        Self::from_lookup(|key| values.get(key).cloned())
    }

    /// Same as [`MatchSetup::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`MatchSetup::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let format = parse_format(lookup(ENV_FORMAT).as_deref())?;

        let team_a = parse_name(ENV_TEAM_A, lookup(ENV_TEAM_A), defaults.team_a)?;
        let team_b = parse_name(ENV_TEAM_B, lookup(ENV_TEAM_B), defaults.team_b)?;
        let players_a = parse_players(ENV_PLAYERS_A, lookup(ENV_PLAYERS_A), format, defaults.players_a)?;
        let players_b = parse_players(ENV_PLAYERS_B, lookup(ENV_PLAYERS_B), format, defaults.players_b)?;

        Ok(Self { format, team_a, team_b, players_a, players_b })
    }
}

/// Parse a format name. `None` means the default (doubles).
///
/// # Errors
///
/// Returns [`ConfigError::UnknownFormat`] for anything else.
pub fn parse_format(raw: Option<&str>) -> Result<Format, ConfigError> {
    match raw.map(str::trim).unwrap_or("doubles") {
        "doubles" => Ok(Format::Doubles),
        "singles" => Ok(Format::Singles),
        other => Err(ConfigError::UnknownFormat(other.to_owned())),
    }
}

fn read_env(var: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var: var.to_owned() }),
    }
}

fn parse_name(var: &str, raw: Option<String>, default: String) -> Result<String, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Err(ConfigError::BlankName { var: var.to_owned() }),
        Some(value) => Ok(value.trim().to_owned()),
    }
}

/// Parse a comma-separated list of player names for `format`.
///
/// Singles expects one name and fills the unused second slot with the
/// matching default.
///
/// # Errors
///
/// Returns [`ConfigError::PlayerCount`] or [`ConfigError::BlankName`].
pub fn parse_players(
    var: &str,
    raw: Option<String>,
    format: Format,
    default: [String; 2],
) -> Result<[String; 2], ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let names: Vec<String> = raw.split(',').map(|name| name.trim().to_owned()).collect();
    if names.iter().any(String::is_empty) {
        return Err(ConfigError::BlankName { var: var.to_owned() });
    }

    let expected = match format {
        Format::Singles => 1,
        Format::Doubles => 2,
    };
    if names.len() != expected {
        return Err(ConfigError::PlayerCount { var: var.to_owned(), expected, got: names.len() });
    }

    let mut names = names.into_iter();
    let [default_first, default_second] = default;
    let first = names.next().unwrap_or(default_first);
    let second = names.next().unwrap_or(default_second);
    Ok([first, second])
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
