//! Filtered listings of stored papers.

use super::*;
use crate::database::{DatabaseInstruction, Query};

/// Offset used when the caller gives none.
pub const DEFAULT_SKIP: usize = 0;
/// Page size used when the caller gives none.
pub const DEFAULT_LIMIT: usize = 10;

/// Read-only access to stored papers.
#[derive(Clone)]
pub struct Library {
  /// Shared store
  db: Arc<Database>,
}

impl Library {
  /// Creates a library over `db`.
  pub fn new(db: Arc<Database>) -> Self { Self { db } }

  /// Lists stored papers, newest first.
  ///
  /// - With a `category`, only that category (and `subtopic`, when given) is listed.
  /// - With only a `subtopic`, papers tagged with it in any category are listed.
  /// - With neither, the reader's preferences select papers; a reader without preferences sees
  ///   everything.
  ///
  /// Blank filter strings count as absent.
  pub async fn list_papers(
    &self,
    user: &User,
    category: Option<&str>,
    subtopic: Option<&str>,
    skip: usize,
    limit: usize,
  ) -> Result<Vec<Paper>> {
    let category = category.map(str::trim).filter(|c| !c.is_empty());
    let subtopic = subtopic.map(str::trim).filter(|s| !s.is_empty());

    let query = match (category, subtopic) {
      (Some(category), subtopic) => {
        let mut preference = Preference::category(category);
        preference.subtopic = subtopic.map(str::to_string);
        Query::any_of(&[preference])
      },
      (None, Some(subtopic)) => Query::by_subtopic(subtopic),
      (None, None) => Query::any_of(&user.preferences),
    };

    debug!("Listing papers for {}: {:?}", user.id, query);
    query.skip(skip).limit(limit).execute(&self.db).await
  }

  /// A single stored paper.
  pub async fn get_paper(&self, arxiv_id: &str) -> Result<Paper> {
    Query::by_arxiv_id(&arxiv_key(arxiv_id))
      .execute(&self.db)
      .await?
      .into_iter()
      .next()
      .ok_or(SummaristError::NotFound)
  }
}
