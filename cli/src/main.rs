mod command;
mod session;
mod terminal;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use scoreboard::config::{
    ConfigError, ENV_FORMAT, ENV_PLAYERS_A, ENV_PLAYERS_B, ENV_TEAM_A, ENV_TEAM_B, MatchSetup,
};
use scoreboard::controller::MatchController;
use tracing::Level;

use crate::command::{HELP, parse_line};
use crate::session::{Flow, Session};
use crate::terminal::TerminalView;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid match setup: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot open input `{path}`: {source}")]
    OpenInput { path: String, source: io::Error },
    #[error("i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "scoreboard", about = "Rally scorekeeper for the terminal")]
struct Cli {
    #[arg(long, help = "singles or doubles; overrides SCOREBOARD_FORMAT (default doubles)")]
    format: Option<String>,

    #[arg(long, help = "Overrides SCOREBOARD_TEAM_A")]
    team_a: Option<String>,

    #[arg(long, help = "Overrides SCOREBOARD_TEAM_B")]
    team_b: Option<String>,

    #[arg(long, help = "Comma-separated player names; overrides SCOREBOARD_PLAYERS_A")]
    players_a: Option<String>,

    #[arg(long, help = "Comma-separated player names; overrides SCOREBOARD_PLAYERS_B")]
    players_b: Option<String>,

    #[arg(long, default_value = "-", help = "Command file path, or - for stdin")]
    input: String,

    #[arg(long, default_value_t = false, help = "Emit one JSON render frame per line")]
    json: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More logging on stderr (-v, -vv)")]
    verbose: u8,
}

impl Cli {
    /// Flags first, then `SCOREBOARD_*` from the environment, then defaults.
    fn setup(&self) -> Result<MatchSetup, ConfigError> {
        MatchSetup::from_env_with(|key| {
            let value = match key {
                ENV_FORMAT => &self.format,
                ENV_TEAM_A => &self.team_a,
                ENV_TEAM_B => &self.team_b,
                ENV_PLAYERS_A => &self.players_a,
                ENV_PLAYERS_B => &self.players_b,
                _ => return None,
            };
            value.clone()
        })
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();

    let setup = cli.setup()?;
    let reader = open_input(&cli.input)?;
    let view = TerminalView::new(io::stdout(), cli.json);
    let mut session = Session::new(MatchController::new(&setup, view));

    session.controller_mut().refresh();
    check_view(&mut session)?;
    run(&mut session, reader)
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>, CliError> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| CliError::OpenInput { path: path.to_owned(), source })?;
    Ok(Box::new(BufReader::new(file)))
}

fn run(session: &mut Session<TerminalView<io::Stdout>>, mut reader: Box<dyn BufRead>) -> Result<(), CliError> {
    let mut rng = rand::rng();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                eprintln!("error: {error}");
                continue;
            }
        };

        let flow = session.execute(command, &mut rng);
        check_view(session)?;
        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Help) => {
                if !session.controller_mut().view_mut().show_help()? {
                    eprintln!("{HELP}");
                }
            }
            Ok(Flow::Quit) => break,
            Err(error) => eprintln!("ignored: {error}"),
        }
    }
    tracing::info!(match_id = %session.controller().id(), "session closed");
    Ok(())
}

fn check_view(session: &mut Session<TerminalView<io::Stdout>>) -> Result<(), CliError> {
    match session.controller_mut().view_mut().take_error() {
        Some(error) => Err(CliError::Io(error)),
        None => Ok(()),
    }
}
