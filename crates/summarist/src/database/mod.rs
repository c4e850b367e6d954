//! Local SQLite store for papers, summaries and reader engagement.
//!
//! The store is the single source of truth for every uniqueness rule the pipeline relies on:
//! - one row per arXiv identifier
//! - at most one summary per paper
//! - one bookmark per (user, paper)
//! - one tag per (paper, subtopic)
//!
//! All reads and writes are expressed as [`DatabaseInstruction`]s and run on the connection's
//! dedicated thread, so a [`Database`] can be shared freely behind an `Arc`.
//!
//! # Examples
//!
//! ```no_run
//! use summarist::{
//!   database::{Add, Database, Query},
//!   prelude::*,
//! };
//!
//! # async fn example(paper: summarist::paper::Paper) -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::open(Database::default_path()).await?;
//! Add::paper(&paper).execute(&db).await?;
//!
//! let newest = Query::list_all().limit(5).execute(&db).await?;
//! for paper in newest {
//!   println!("{}: {}", paper.arxiv_id, paper.title);
//! }
//! # Ok(())
//! # }
//! ```

use tokio_rusqlite::Connection;

use super::*;

pub mod instruction;
mod models;

pub use self::instruction::{
  add::{Add, OnConflict},
  cache::{GetSummary, PutSummary},
  engagement::{Activity, ActivityEntry, ActivityKind, Track, TrackAction},
  query::{Query, QueryCriteria},
  DatabaseInstruction,
};

/// Handle for interacting with the store.
///
/// Opening a database creates the file (and its parent directories) if needed and applies the
/// schema, which is idempotent.
pub struct Database {
  /// Async SQLite connection handle
  conn: Connection,
}

impl Database {
  /// Opens an existing database or creates a new one at the specified path.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// # use summarist::database::Database;
  /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
  /// // Open in a specific location
  /// let db = Database::open("papers.db").await?;
  ///
  /// // Or use the default location
  /// let db = Database::open(Database::default_path()).await?;
  /// # Ok(())
  /// # }
  /// ```
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    debug!("Opening database at {}", path.display());

    let conn = Connection::open(path).await?;
    conn
      .call(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(include_str!(concat!(
          env!("CARGO_MANIFEST_DIR"),
          "/migrations/init.sql"
        )))?;
        Ok(())
      })
      .await?;

    Ok(Self { conn })
  }

  /// Returns the default path for the database file.
  ///
  /// The path is constructed as follows:
  /// - On Unix: `~/.local/share/summarist/summarist.db`
  /// - On macOS: `~/Library/Application Support/summarist/summarist.db`
  /// - On Windows: `%APPDATA%\summarist\summarist.db`
  /// - Fallback: `./summarist/summarist.db`
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("summarist").join("summarist.db")
  }
}
