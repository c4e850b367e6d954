//! Reader engagement: bookmarks and reading history.

use super::*;
use crate::database::{Activity, ActivityEntry, DatabaseInstruction, Track};

/// Records and lists what readers bookmark and read.
#[derive(Clone)]
pub struct Engagement {
  /// Shared store
  db: Arc<Database>,
}

impl Engagement {
  /// Creates the tracker.
  pub fn new(db: Arc<Database>) -> Self { Self { db } }

  /// Bookmarks a stored paper. Returns `false` if it was already bookmarked.
  pub async fn bookmark(&self, user: &User, arxiv_id: &str) -> Result<bool> {
    Track::bookmark(&user.id, &arxiv_key(arxiv_id)).execute(&self.db).await
  }

  /// Removes a bookmark. Returns `false` if there was none.
  pub async fn remove_bookmark(&self, user: &User, arxiv_id: &str) -> Result<bool> {
    Track::unbookmark(&user.id, &arxiv_key(arxiv_id)).execute(&self.db).await
  }

  /// Appends a read of a stored paper to the reader's history.
  pub async fn record_read(&self, user: &User, arxiv_id: &str) -> Result<()> {
    Track::read(&user.id, &arxiv_key(arxiv_id)).execute(&self.db).await?;
    Ok(())
  }

  /// The reader's bookmarks, most recent first.
  pub async fn list_bookmarks(
    &self,
    user: &User,
    skip: usize,
    limit: usize,
  ) -> Result<Vec<ActivityEntry>> {
    Activity::bookmarks(&user.id).skip(skip).limit(limit).execute(&self.db).await
  }

  /// Papers the reader has read, most recently read first, each listed once.
  pub async fn list_history(
    &self,
    user: &User,
    skip: usize,
    limit: usize,
  ) -> Result<Vec<ActivityEntry>> {
    Activity::history(&user.id).skip(skip).limit(limit).execute(&self.db).await
  }
}
