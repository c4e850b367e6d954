//! Errors surfaced by the command line front end.

use thiserror::Error;

/// Result alias for the CLI.
pub type Result<T> = core::result::Result<T, SummaristdError>;

/// Everything a command can fail with.
#[derive(Error, Debug)]
pub enum SummaristdError {
  /// Failure inside the library.
  #[error(transparent)]
  Summarist(#[from] summarist::error::SummaristError),

  /// A prompt could not be shown or answered.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Filesystem failure while cleaning up.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Invalid pattern while collecting database side files.
  #[error(transparent)]
  Glob(#[from] glob::PatternError),
}
