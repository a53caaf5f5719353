mod app;
mod command;
mod config;
mod logo;
mod menu;
mod play;
mod theme;
mod util;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use lexopt::{Arg, Parser};
use powersnake::{GameSession, ScoreStore};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

static USAGE: &str = "\
Usage: powersnake [<options>]

Play snake in the terminal, with power-ups, coins, and bonus rounds

Options:
  --config <PATH>       Read configuration from the given file
  --scores-file <PATH>  Store high scores in the given file
  --log-file <PATH>     Write log messages to the given file
  -h, --help            Show this help message and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Long("config") => args.config = Some(PathBuf::from(parser.value()?)),
                Arg::Long("scores-file") => args.scores_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    scores_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        if let Some(ref path) = self.log_file {
            init_logging(path)?;
        }
        log::info!(
            "Starting {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        let config = self.load_config()?;
        let scores_file = self
            .scores_file
            .unwrap_or_else(|| config.high_scores_file());
        let session = GameSession::new(ScoreStore::open(scores_file));
        let terminal = ratatui::init();
        let r = App::new(session).run(terminal);
        ratatui::restore();
        r.map_err(Into::into)
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let (path, allow_missing) = match self.config {
            Some(ref path) => (path.clone(), false),
            None => match Config::default_path() {
                Ok(path) => (path, true),
                Err(e) => {
                    log::warn!("{e}; using default configuration");
                    return Ok(Config::default());
                }
            },
        };
        log::debug!("Reading configuration from {}", path.display());
        Config::load(&path, allow_missing)
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    }
}

/// Send log messages to a file, filtered by `RUST_LOG` (default: "info").
/// The terminal is taken over by the game, so nothing is logged unless a
/// file is given.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(Command::Run(args)) => io_exit(args.run()),
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", env!("CARGO_PKG_NAME"));
            eprintln!("Run with --help for usage");
            ExitCode::from(2)
        }
    }
}

fn io_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:?}");
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
