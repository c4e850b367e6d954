//! Command line interface for `summarist`.
//!
//! A thin front end over the [`summarist`] library:
//! - Set up a configuration file and database
//! - Search arXiv, or refresh the local store from it
//! - List stored papers by category, subtopic or the reader's preferences
//! - Show cached summaries, generating them on first request
//! - Bookmark papers and keep a reading history
//!
//! # Usage
//!
//! ```bash
//! # Create the configuration and database
//! summarist init
//!
//! # Store the last week of computer vision papers
//! summarist refresh --category cs.CV --days 7
//!
//! # Browse them and read a summary
//! summarist list --category cs.CV
//! summarist summary 2401.08003 --api-key sk-...
//!
//! # Remove the database
//! summarist clean
//! ```
//!
//! Verbosity grows with each `-v`; `RUST_LOG` takes precedence when set.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Args, Parser};
use console::style;
use summarist::{
  category::Category,
  database::{ActivityEntry, Database},
  paper::{Paper, PaperView},
  summary::Summary,
  user::User,
  Config, Summarist,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Recent arXiv papers with cached language-model summaries")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Configuration file. Defaults to the platform-specific config directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Database file, overriding the configured one.
  #[arg(long, short, global = true)]
  path: Option<PathBuf>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

impl Cli {
  /// The configuration file in use.
  fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }

  /// Loads the configuration, applying `--path`.
  fn load_config(&self) -> Result<Config> {
    let config = Config::load_or_default_from(self.config_path())?;
    Ok(match &self.path {
      Some(path) => config.with_database_path(path),
      None => config,
    })
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Runs the parsed command.
async fn run(cli: Cli) -> Result<()> {
  let terminal = Terminal::new(cli.accept_defaults);

  // Commands that work without an open store.
  match &cli.command {
    Commands::Init(options) => return init(&terminal, &cli, options).await,
    Commands::Clean => return clean(&terminal, &cli),
    Commands::Categories => return categories(&terminal),
    _ => {},
  }

  let config = cli.load_config()?;
  trace!("Using database at: {}", config.database_path.display());
  let summarist = Summarist::builder().with_config(config).build().await?;
  let user = summarist.config.user.to_user();
  debug!("Acting as reader {} ({})", user.id, user.tier);

  match cli.command {
    Commands::Search(options) => search(&terminal, &summarist, &options).await,
    Commands::Refresh(options) => refresh(&terminal, &summarist, &options).await,
    Commands::List(options) => list(&terminal, &summarist, &user, &options).await,
    Commands::Summary(options) => summary(&terminal, &summarist, &user, &options).await,
    Commands::Bookmark { identifier } => bookmark(&terminal, &summarist, &user, &identifier).await,
    Commands::Unbookmark { identifier } =>
      unbookmark(&terminal, &summarist, &user, &identifier).await,
    Commands::Read { identifier } => read(&terminal, &summarist, &user, &identifier).await,
    Commands::Bookmarks(page) => bookmarks(&terminal, &summarist, &user, &page).await,
    Commands::History(page) => history(&terminal, &summarist, &user, &page).await,
    Commands::Init(_) | Commands::Clean | Commands::Categories => Ok(()),
  }
}

/// Entry point for the `summarist` binary.
///
/// Errors are printed with a styled prefix and turn into a non-zero exit status.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{} {}", style(ERROR_PREFIX).red(), style(&e).red());
      ExitCode::FAILURE
    },
  }
}
