//! Bookmarks and reading history.
//!
//! Bookmarks are a set per reader: bookmarking twice keeps the first timestamp. Reading history
//! is an append-only log; listings collapse it to one entry per paper at its latest read.

use super::*;

/// A change to a reader's engagement with a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackAction {
  /// Add the paper to the reader's bookmarks
  Bookmark,
  /// Remove the paper from the reader's bookmarks
  Unbookmark,
  /// Append a read event
  Read,
}

/// Records a [`TrackAction`].
///
/// Yields whether anything changed. Fails with [`SummaristError::NotFound`] when the paper is
/// not stored.
#[derive(Debug, Clone)]
pub struct Track {
  /// Reader
  user_id:  String,
  /// Paper
  arxiv_id: String,
  /// What happened
  action:   TrackAction,
  /// When it happened
  at:       DateTime<Utc>,
}

impl Track {
  /// Creates an instruction for `action`, stamped now.
  pub fn new(user_id: &str, arxiv_id: &str, action: TrackAction) -> Self {
    Self { user_id: user_id.into(), arxiv_id: arxiv_id.into(), action, at: Utc::now() }
  }

  /// Bookmarks a paper.
  pub fn bookmark(user_id: &str, arxiv_id: &str) -> Self {
    Self::new(user_id, arxiv_id, TrackAction::Bookmark)
  }

  /// Removes a bookmark.
  pub fn unbookmark(user_id: &str, arxiv_id: &str) -> Self {
    Self::new(user_id, arxiv_id, TrackAction::Unbookmark)
  }

  /// Records a read.
  pub fn read(user_id: &str, arxiv_id: &str) -> Self {
    Self::new(user_id, arxiv_id, TrackAction::Read)
  }

  /// Overrides the event time.
  pub fn at(mut self, at: DateTime<Utc>) -> Self {
    self.at = at;
    self
  }
}

#[async_trait]
impl DatabaseInstruction for Track {
  type Output = bool;

  async fn execute(&self, db: &Database) -> Result<Self::Output> {
    let Track { user_id, arxiv_id, action, at } = self.clone();

    let changed = db
      .conn
      .call(move |conn| {
        let Some(id) = paper_id(conn, &arxiv_id)? else {
          return Ok(None);
        };
        let at = to_timestamp(&at);
        let changed = match action {
          TrackAction::Bookmark => conn
            .prepare_cached(
              "INSERT INTO bookmarks (user_id, paper_id, created_at) VALUES (?1, ?2, ?3)
               ON CONFLICT (user_id, paper_id) DO NOTHING",
            )?
            .execute(params![user_id, id, at])?,
          TrackAction::Unbookmark => conn
            .prepare_cached("DELETE FROM bookmarks WHERE user_id = ?1 AND paper_id = ?2")?
            .execute(params![user_id, id])?,
          TrackAction::Read => conn
            .prepare_cached(
              "INSERT INTO reading_history (user_id, paper_id, read_at) VALUES (?1, ?2, ?3)",
            )?
            .execute(params![user_id, id, at])?,
        };
        Ok(Some(changed > 0))
      })
      .await?;

    let changed = changed.ok_or(SummaristError::NotFound)?;
    trace!("{:?} {} for {}: changed = {changed}", self.action, self.arxiv_id, self.user_id);
    Ok(changed)
  }
}

/// Which engagement list to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
  /// Bookmarked papers, most recently bookmarked first
  Bookmarks,
  /// Read papers, most recently read first, one entry per paper
  History,
}

/// A paper with the time of the engagement that listed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
  /// The paper
  pub paper: Paper,
  /// Bookmark time, or latest read time
  pub at:    DateTime<Utc>,
}

/// Lists a reader's bookmarks or history, newest first.
#[derive(Debug, Clone)]
pub struct Activity {
  /// Reader
  user_id: String,
  /// List to read
  kind:    ActivityKind,
  /// Entries skipped
  skip:    usize,
  /// Maximum entries
  limit:   Option<usize>,
}

impl Activity {
  /// The reader's bookmarks.
  pub fn bookmarks(user_id: &str) -> Self {
    Self { user_id: user_id.into(), kind: ActivityKind::Bookmarks, skip: 0, limit: None }
  }

  /// The reader's history.
  pub fn history(user_id: &str) -> Self {
    Self { user_id: user_id.into(), kind: ActivityKind::History, skip: 0, limit: None }
  }

  /// Skips the first `skip` entries.
  pub fn skip(mut self, skip: usize) -> Self {
    self.skip = skip;
    self
  }

  /// Returns at most `limit` entries.
  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }
}

#[async_trait]
impl DatabaseInstruction for Activity {
  type Output = Vec<ActivityEntry>;

  async fn execute(&self, db: &Database) -> Result<Self::Output> {
    let user_id = self.user_id.clone();
    let sql = match self.kind {
      ActivityKind::Bookmarks => format!(
        "SELECT paper_id, created_at FROM bookmarks
         WHERE user_id = ?1
         ORDER BY created_at DESC, id DESC
         {}",
        pagination(self.skip, self.limit)
      ),
      ActivityKind::History => format!(
        "SELECT paper_id, MAX(read_at) AS last_read FROM reading_history
         WHERE user_id = ?1
         GROUP BY paper_id
         ORDER BY last_read DESC, MAX(id) DESC
         {}",
        pagination(self.skip, self.limit)
      ),
    };

    let entries = db
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let rows = {
          let mut stmt = tx.prepare_cached(&sql)?;
          let rows = stmt
            .query_map([&user_id], |row| Ok((row.get::<_, i64>(0)?, timestamp(row, 1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows
        };
        let entries = rows
          .into_iter()
          .map(|(id, at)| Ok(ActivityEntry { paper: load_paper(&tx, id)?, at }))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(entries)
      })
      .await?;

    Ok(entries)
  }
}
