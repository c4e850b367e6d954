//! Storing papers.
//!
//! Papers are immutable once stored, so a second add of the same arXiv identifier can only be
//! refused ([`OnConflict::Reject`]) or answered with the row already there
//! ([`OnConflict::Ignore`]). Either way the store never holds two rows for one identifier.

use super::*;

/// What to do when the paper's identifier is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
  /// Fail with [`SummaristError::DatabaseDuplicatePaper`].
  Reject,
  /// Keep the stored row untouched and return it.
  Ignore,
}

/// Inserts a paper and its authors, optionally tagging it with a subtopic.
///
/// Yields the stored paper: the one just inserted, or the pre-existing row under
/// [`OnConflict::Ignore`]. A subtopic tag is recorded in both cases.
#[derive(Debug, Clone)]
pub struct Add {
  /// Paper to store
  paper:       Paper,
  /// Conflict handling
  on_conflict: OnConflict,
  /// Tag to attach
  subtopic:    Option<String>,
}

impl Add {
  /// Adds a paper, rejecting duplicates.
  pub fn paper(paper: &Paper) -> Self {
    Self { paper: paper.clone(), on_conflict: OnConflict::Reject, subtopic: None }
  }

  /// Adds a paper unless one with the same identifier exists, in which case that one is kept.
  pub fn merge(paper: &Paper) -> Self {
    Self { paper: paper.clone(), on_conflict: OnConflict::Ignore, subtopic: None }
  }

  /// Tags the paper with `subtopic`. Blank subtopics are ignored.
  pub fn with_subtopic(mut self, subtopic: Option<&str>) -> Self {
    self.subtopic = subtopic.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    self
  }
}

#[async_trait]
impl DatabaseInstruction for Add {
  type Output = Paper;

  async fn execute(&self, db: &Database) -> Result<Self::Output> {
    let paper = self.paper.clone();
    let on_conflict = self.on_conflict;
    let subtopic = self.subtopic.clone();

    let result = db
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let inserted: Option<i64> = {
          let sql = match on_conflict {
            OnConflict::Reject =>
              "INSERT INTO papers (arxiv_id, title, abstract_text, category, published, url, \
               pdf_url)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               RETURNING id",
            OnConflict::Ignore =>
              "INSERT INTO papers (arxiv_id, title, abstract_text, category, published, url, \
               pdf_url)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               ON CONFLICT (arxiv_id) DO NOTHING
               RETURNING id",
          };
          let mut stmt = tx.prepare_cached(sql)?;
          stmt
            .query_row(
              params![
                paper.arxiv_id,
                paper.title,
                paper.abstract_text,
                paper.category,
                to_timestamp(&paper.published),
                paper.url,
                paper.pdf_url,
              ],
              |row| row.get(0),
            )
            .optional()?
        };

        let id = match inserted {
          Some(id) => {
            let mut stmt = tx.prepare_cached(
              "INSERT INTO authors (paper_id, position, name) VALUES (?1, ?2, ?3)",
            )?;
            for (position, author) in paper.authors.iter().enumerate() {
              stmt.execute(params![id, position as i64, author.name])?;
            }
            id
          },
          None => paper_id(&tx, &paper.arxiv_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?,
        };

        if let Some(subtopic) = &subtopic {
          tx.prepare_cached(
            "INSERT INTO paper_subtopics (paper_id, subtopic) VALUES (?1, ?2)
             ON CONFLICT (paper_id, subtopic) DO NOTHING",
          )?
          .execute(params![id, subtopic])?;
        }

        let stored = load_paper(&tx, id)?;
        tx.commit()?;
        Ok((stored, inserted.is_some()))
      })
      .await;

    match result {
      Ok((stored, inserted)) => {
        if inserted {
          debug!("Stored paper {}", stored.arxiv_id);
        } else {
          trace!("Paper {} already stored, keeping existing row", stored.arxiv_id);
        }
        Ok(stored)
      },
      Err(e) => {
        let e = SummaristError::from(e);
        if e.is_duplicate_error() {
          Err(SummaristError::DatabaseDuplicatePaper(self.paper.title.clone()))
        } else {
          Err(e)
        }
      },
    }
  }
}
