//! Access to the external paper index.
//!
//! The [`PaperIndex`] trait is the seam between the services and whatever answers paper
//! searches. [`ArxivClient`] is the production implementation; tests substitute an in-memory
//! fake.
//!
//! Searches are always bounded: a [`SearchQuery`] clamps the number of results to
//! [`MAX_RESULTS_CEILING`] and the look-back window to [`DAYS_CEILING`] days, so no caller can
//! ask the index for an unbounded amount of work.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use summarist::clients::SearchQuery;
//!
//! let query = SearchQuery::new("cs.AI", 500, 90);
//! assert_eq!(query.max_results(), 50);
//! assert_eq!(query.days(), 30);
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
//! assert_eq!(
//!   query.search_query(now),
//!   "cat:cs.AI AND submittedDate:[20240301000000 TO 20240331235959]"
//! );
//! ```

use chrono::Duration;

use super::*;
use crate::category::DEFAULT_CATEGORY;

pub mod arxiv;

pub use self::arxiv::ArxivClient;

/// Largest number of results a single search may request.
pub const MAX_RESULTS_CEILING: usize = 50;
/// Longest look-back window, in days, a single search may request.
pub const DAYS_CEILING: u32 = 30;
/// Results requested when the caller does not say.
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Look-back window used when the caller does not say.
pub const DEFAULT_DAYS: u32 = 7;

/// A source of papers that can be searched by category and submission window.
#[async_trait]
pub trait PaperIndex: Send + Sync {
  /// Runs a bounded search.
  ///
  /// Individual entries that cannot be converted into a [`Paper`] are skipped. The call only
  /// fails when the index itself cannot be reached or its answer cannot be read as a whole.
  async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>>;

  /// Looks up a single paper by arXiv identifier.
  ///
  /// Fails with [`SummaristError::NotFound`] when the index has no such paper.
  async fn fetch_by_id(&self, arxiv_id: &str) -> Result<Paper>;
}

/// A category search restricted to recent submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  /// Category code
  category:    String,
  /// Clamped result count
  max_results: usize,
  /// Clamped look-back window in days
  days:        u32,
  /// Optional free-text restriction
  subtopic:    Option<String>,
}

impl Default for SearchQuery {
  fn default() -> Self { Self::new(DEFAULT_CATEGORY, DEFAULT_MAX_RESULTS, DEFAULT_DAYS) }
}

impl SearchQuery {
  /// Creates a query, silently clamping `max_results` and `days` to their ceilings.
  pub fn new(category: impl Into<String>, max_results: usize, days: u32) -> Self {
    let max_results = max_results.min(MAX_RESULTS_CEILING);
    let days = days.min(DAYS_CEILING);
    Self { category: category.into(), max_results, days, subtopic: None }
  }

  /// Restricts the search to entries mentioning `subtopic` anywhere.
  ///
  /// Blank subtopics are ignored.
  pub fn with_subtopic(mut self, subtopic: impl Into<String>) -> Self {
    let subtopic = subtopic.into();
    let subtopic = subtopic.trim();
    self.subtopic = (!subtopic.is_empty()).then(|| subtopic.to_string());
    self
  }

  /// The category code searched.
  pub fn category(&self) -> &str { &self.category }

  /// The effective (clamped) number of results.
  pub fn max_results(&self) -> usize { self.max_results }

  /// The effective (clamped) window in days.
  pub fn days(&self) -> u32 { self.days }

  /// The subtopic restriction, if any.
  pub fn subtopic(&self) -> Option<&str> { self.subtopic.as_deref() }

  /// Renders the arXiv `search_query` expression for a window ending at `now`.
  ///
  /// The window covers whole days: from midnight `days` days ago through the last second of
  /// today.
  pub fn search_query(&self, now: DateTime<Utc>) -> String {
    let start = now - Duration::days(i64::from(self.days));
    let mut expression = format!(
      "cat:{} AND submittedDate:[{}000000 TO {}235959]",
      self.category,
      start.format("%Y%m%d"),
      now.format("%Y%m%d")
    );
    if let Some(subtopic) = &self.subtopic {
      expression.push_str(&format!(" AND all:\"{}\"", subtopic.replace('"', "")));
    }
    expression
  }
}
