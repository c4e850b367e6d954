//! Bringing papers in from the index.
//!
//! Searching and persisting are separate: [`Ingestor::search`] is a pure read of the index,
//! [`Ingestor::refresh`] additionally stores what it finds. Nothing on the listing path ever
//! calls the index.

use super::*;
use crate::{
  clients::SearchQuery,
  database::{Add, DatabaseInstruction, GetSummary, Query},
};

/// Index access plus persistence of what the index returns.
#[derive(Clone)]
pub struct Ingestor {
  /// Shared store
  db:    Arc<Database>,
  /// External index
  index: Arc<dyn PaperIndex>,
}

impl Ingestor {
  /// Creates an ingestor.
  pub fn new(db: Arc<Database>, index: Arc<dyn PaperIndex>) -> Self { Self { db, index } }

  /// Searches the index without storing anything.
  ///
  /// Views carry a summary only when one is already cached.
  pub async fn search(&self, query: &SearchQuery) -> Result<Vec<PaperView>> {
    let papers = self.index.search(query).await?;
    let mut views = Vec::with_capacity(papers.len());
    for paper in &papers {
      let mut view = PaperView::from(paper);
      view.summary = GetSummary::of(&paper.arxiv_id).execute(&self.db).await?;
      views.push(view);
    }
    Ok(views)
  }

  /// Searches the index and stores every result not already stored.
  ///
  /// Stored rows are never modified; results are tagged with the query's subtopic, if any. A
  /// paper that fails to store is logged and left out. Returns the stored papers in index order.
  pub async fn refresh(&self, query: &SearchQuery) -> Result<Vec<Paper>> {
    let found = self.index.search(query).await?;
    let mut stored = Vec::with_capacity(found.len());
    for paper in &found {
      match Add::merge(paper).with_subtopic(query.subtopic()).execute(&self.db).await {
        Ok(paper) => stored.push(paper),
        Err(e) => warn!("Failed to store paper {}: {e}", paper.arxiv_id),
      }
    }
    debug!("Refreshed {} of {} papers for {}", stored.len(), found.len(), query.category());
    Ok(stored)
  }

  /// The stored paper with `arxiv_id`, fetching and storing it from the index if needed.
  pub async fn fetch(&self, arxiv_id: &str) -> Result<Paper> {
    let arxiv_id = normalize_arxiv_id(arxiv_id).ok_or(SummaristError::NotFound)?;
    if let Some(paper) = Query::by_arxiv_id(&arxiv_id).execute(&self.db).await?.into_iter().next()
    {
      return Ok(paper);
    }
    debug!("Paper {arxiv_id} not stored, asking the index");
    let paper = self.index.fetch_by_id(&arxiv_id).await?;
    Add::merge(&paper).execute(&self.db).await
  }
}
