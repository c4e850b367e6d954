//! Error types for the summarist library.
//!
//! A single error enum covers every failure the core can surface:
//! - Unknown papers
//! - Missing credentials and tier gating
//! - Upstream index failures
//! - Database and configuration problems
//!
//! Language-model failures are intentionally absent: the
//! [`SummaryGenerator`](crate::generator::SummaryGenerator) folds them into a degraded summary.
//!
//! # Examples
//!
//! ```no_run
//! use summarist::{clients::ArxivClient, prelude::*};
//!
//! # async fn example() -> Result<(), SummaristError> {
//! match ArxivClient::new()?.fetch_by_id("2301.07041").await {
//!   Err(SummaristError::NotFound) => println!("No such paper"),
//!   Err(e) if e.is_upstream() => println!("arXiv is unavailable: {e}"),
//!   Err(e) => return Err(e),
//!   Ok(paper) => println!("{}", paper.title),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`summarist`](crate) crate.
pub type Result<T> = core::result::Result<T, SummaristError>;

/// Errors that can occur when working with the summarist library.
#[derive(Error, Debug)]
pub enum SummaristError {
  /// The requested paper is neither in the store nor, where consulted, in the index.
  #[error("Paper not found")]
  NotFound,

  /// A language-model credential was required but none was supplied.
  #[error("A model API key is required for this operation")]
  Unauthorized,

  /// The reader's subscription tier does not permit the operation.
  ///
  /// The string describes the tier that would have been required.
  #[error("Access denied: {0}")]
  AccessDenied(String),

  /// The paper index answered, but not with something usable.
  ///
  /// This covers non-success HTTP statuses and feeds that cannot be read as a whole. A single
  /// malformed entry inside an otherwise readable feed never produces this error.
  #[error("Paper index failure: {0}")]
  Upstream(String),

  /// A network request to the paper index failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS/SSL errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// Tried to add a paper whose arXiv identifier is already stored.
  ///
  /// Carries the title of the conflicting paper.
  #[error("Tried to add a paper titled \"{0}\" that was already in the database.")]
  DatabaseDuplicatePaper(String),

  /// A SQLite operation failed.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// An async SQLite operation failed.
  #[error(transparent)]
  AsyncSqlite(#[from] tokio_rusqlite::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be written out.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A summary was written for the paper but never became readable.
  ///
  /// Carries the arXiv identifier.
  #[error("Summary for {0} was stored but could not be read back")]
  SummaryNotStored(String),

  /// Any other configuration problem.
  #[error("{0}")]
  Config(String),
}

impl SummaristError {
  /// Whether this error originated with the external paper index rather than locally.
  pub fn is_upstream(&self) -> bool {
    matches!(self, SummaristError::Upstream(_) | SummaristError::Network(_))
  }

  /// Checks if this error is SQLite's unique constraint violation.
  ///
  /// This is how concurrent inserts of the same paper, summary or bookmark surface before they
  /// are folded into an insert-or-fetch.
  pub fn is_duplicate_error(&self) -> bool {
    let sqlite = match self {
      SummaristError::Sqlite(e) => e,
      SummaristError::AsyncSqlite(tokio_rusqlite::Error::Rusqlite(e)) => e,
      SummaristError::DatabaseDuplicatePaper(_) => return true,
      _ => return false,
    };
    matches!(
        sqlite,
        rusqlite::Error::SqliteFailure(error, _)
            if error.code == rusqlite::ErrorCode::ConstraintViolation
    )
  }
}
