//! Reading papers back out of the store.
//!
//! Listings are always ordered newest first by submission time, ties broken by ascending arXiv
//! identifier, so pagination with `skip`/`limit` is stable.

use super::*;

/// Which papers a [`Query`] selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCriteria {
  /// The paper with this arXiv identifier
  ArxivId(String),
  /// Papers matching any of the preferences; each preference matches its category exactly and,
  /// when it names one, a subtopic tag exactly
  AnyOf(Vec<Preference>),
  /// Papers tagged with this subtopic, in any category
  Subtopic(String),
  /// Every stored paper
  All,
}

/// A query for retrieving papers from the database.
#[derive(Debug, Clone)]
pub struct Query {
  /// Selection
  criteria: QueryCriteria,
  /// Rows skipped before the first returned
  skip:     usize,
  /// Maximum rows returned
  limit:    Option<usize>,
}

impl Query {
  /// Creates a new query with the given criteria.
  pub fn new(criteria: QueryCriteria) -> Self { Self { criteria, skip: 0, limit: None } }

  /// Creates a query for a single paper.
  pub fn by_arxiv_id(arxiv_id: &str) -> Self { Self::new(QueryCriteria::ArxivId(arxiv_id.into())) }

  /// Creates a query for papers matching any of `preferences`.
  ///
  /// An empty preference list matches every paper.
  pub fn any_of(preferences: &[Preference]) -> Self {
    if preferences.is_empty() {
      Self::list_all()
    } else {
      Self::new(QueryCriteria::AnyOf(preferences.to_vec()))
    }
  }

  /// Creates a query for papers tagged with `subtopic`.
  pub fn by_subtopic(subtopic: &str) -> Self { Self::new(QueryCriteria::Subtopic(subtopic.into())) }

  /// Creates a query that returns all papers.
  pub fn list_all() -> Self { Self::new(QueryCriteria::All) }

  /// Skips the first `skip` results.
  pub fn skip(mut self, skip: usize) -> Self {
    self.skip = skip;
    self
  }

  /// Returns at most `limit` results.
  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }

  /// Builds the id-selecting SQL and its parameters.
  fn build_sql(&self) -> (String, Vec<String>) {
    let (condition, params) = match &self.criteria {
      QueryCriteria::ArxivId(arxiv_id) => ("p.arxiv_id = ?1".to_string(), vec![arxiv_id.clone()]),
      QueryCriteria::AnyOf(preferences) => {
        let mut params = Vec::new();
        let clauses: Vec<String> = preferences
          .iter()
          .map(|preference| {
            params.push(preference.category.clone());
            let category = format!("p.category = ?{}", params.len());
            match &preference.subtopic {
              Some(subtopic) => {
                params.push(subtopic.clone());
                format!("({category} AND {})", has_subtopic(params.len()))
              },
              None => format!("({category})"),
            }
          })
          .collect();
        (clauses.join(" OR "), params)
      },
      QueryCriteria::Subtopic(subtopic) => (has_subtopic(1), vec![subtopic.clone()]),
      QueryCriteria::All => ("1 = 1".to_string(), Vec::new()),
    };

    let sql = format!(
      "SELECT {PAPER_COLUMNS} FROM papers p
       WHERE {condition}
       ORDER BY p.published DESC, p.arxiv_id ASC
       {}",
      pagination(self.skip, self.limit)
    );
    (sql, params)
  }
}

/// Condition matching papers tagged with the subtopic bound to parameter `index`.
fn has_subtopic(index: usize) -> String {
  format!(
    "EXISTS (SELECT 1 FROM paper_subtopics s WHERE s.paper_id = p.id AND s.subtopic = ?{index})"
  )
}

#[async_trait]
impl DatabaseInstruction for Query {
  type Output = Vec<Paper>;

  async fn execute(&self, db: &Database) -> Result<Self::Output> {
    let (sql, params) = self.build_sql();
    trace!("Executing query: {sql}");

    let papers = db
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let rows = {
          let mut stmt = tx.prepare_cached(&sql)?;
          let rows = stmt
            .query_map(params_from_iter(params), PaperRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows
        };
        let papers =
          rows.into_iter().map(|row| row.into_paper(&tx)).collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(papers)
      })
      .await?;

    Ok(papers)
  }
}
