//! The summary cache.
//!
//! `summaries.paper_id` is unique, so storing is an insert-or-keep: whichever writer gets there
//! first wins and every writer reads back the same row.

use super::*;

/// Looks up the cached summary of a paper.
#[derive(Debug, Clone)]
pub struct GetSummary {
  /// Paper whose summary is wanted
  arxiv_id: String,
}

impl GetSummary {
  /// Summary of the paper with `arxiv_id`.
  pub fn of(arxiv_id: &str) -> Self { Self { arxiv_id: arxiv_id.to_string() } }
}

#[async_trait]
impl DatabaseInstruction for GetSummary {
  type Output = Option<Summary>;

  async fn execute(&self, db: &Database) -> Result<Self::Output> {
    let arxiv_id = self.arxiv_id.clone();
    let summary = db
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {SUMMARY_COLUMNS} FROM summaries s
           JOIN papers p ON p.id = s.paper_id
           WHERE p.arxiv_id = ?1"
        );
        Ok(conn.prepare_cached(&sql)?.query_row([arxiv_id], summary_from_row).optional()?)
      })
      .await?;
    Ok(summary)
  }
}

/// Stores a summary unless the paper already has one, then reads back whichever is stored.
///
/// Yields `None` when the paper itself is not stored.
#[derive(Debug, Clone)]
pub struct PutSummary {
  /// Paper the summary belongs to
  arxiv_id: String,
  /// Candidate summary
  summary:  Summary,
}

impl PutSummary {
  /// Stores `summary` for the paper with `arxiv_id`.
  pub fn new(arxiv_id: &str, summary: &Summary) -> Self {
    Self { arxiv_id: arxiv_id.to_string(), summary: summary.clone() }
  }
}

#[async_trait]
impl DatabaseInstruction for PutSummary {
  type Output = Option<Summary>;

  async fn execute(&self, db: &Database) -> Result<Self::Output> {
    let arxiv_id = self.arxiv_id.clone();
    let summary = self.summary.clone();
    let stored = db
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let inserted = tx
          .prepare_cached(
            "INSERT INTO summaries (paper_id, observation, objective, challenge, main_idea, \
             generated_at)
             SELECT id, ?2, ?3, ?4, ?5, ?6 FROM papers WHERE arxiv_id = ?1
             ON CONFLICT (paper_id) DO NOTHING",
          )?
          .execute(params![
            arxiv_id,
            summary.observation,
            summary.objective,
            summary.challenge,
            summary.main_idea,
            to_timestamp(&summary.generated_at),
          ])?;

        let sql = format!(
          "SELECT {SUMMARY_COLUMNS} FROM summaries s
           JOIN papers p ON p.id = s.paper_id
           WHERE p.arxiv_id = ?1"
        );
        let stored = tx.prepare_cached(&sql)?.query_row([&arxiv_id], summary_from_row).optional()?;
        tx.commit()?;
        Ok((stored, inserted > 0))
      })
      .await?;

    match stored {
      (Some(_), true) => debug!("Cached summary for {}", self.arxiv_id),
      (Some(_), false) => debug!("Summary for {} already cached, keeping it", self.arxiv_id),
      (None, _) => warn!("No stored paper {} to attach a summary to", self.arxiv_id),
    }
    Ok(stored.0)
  }
}
