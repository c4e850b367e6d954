//! Paper metadata as observed from the arXiv index.
//!
//! A [`Paper`] is created the first time it is seen (from a search or a direct lookup) and is
//! never changed afterwards. Its arXiv identifier is the key everything else hangs off.
//!
//! # Examples
//!
//! ```
//! use summarist::paper::normalize_arxiv_id;
//!
//! assert_eq!(normalize_arxiv_id("http://arxiv.org/abs/2301.07041v2"), Some("2301.07041".into()));
//! assert_eq!(normalize_arxiv_id("math.AG/0601001"), Some("math.AG/0601001".into()));
//! assert_eq!(normalize_arxiv_id("not an id"), None);
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

/// Complete representation of a paper as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
  /// arXiv identifier without version suffix (e.g. "2301.07041")
  pub arxiv_id:      String,
  /// The paper's full title, whitespace-normalized
  pub title:         String,
  /// Authors in the order the index lists them
  pub authors:       Vec<Author>,
  /// Full abstract text
  pub abstract_text: String,
  /// Primary arXiv category code (e.g. "cs.CV")
  pub category:      String,
  /// When the first version was submitted
  pub published:     DateTime<Utc>,
  /// Canonical abstract page
  pub url:           String,
  /// Direct PDF link, if the index offered one
  pub pdf_url:       Option<String>,
}

/// Author of a paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// Author's full name
  pub name: String,
}

impl Paper {
  /// Author names joined for display.
  pub fn author_names(&self) -> String {
    self.authors.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
  }
}

/// Lightweight projection returned by the standalone search surface.
///
/// Summaries are never generated for search results; `summary` is filled only when the caller
/// already has one at hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperView {
  /// The paper's title
  pub title:         String,
  /// Author names
  pub authors:       Vec<String>,
  /// Submission timestamp
  pub published:     DateTime<Utc>,
  /// Optional structured summary
  pub summary:       Option<Summary>,
  /// Abstract text
  pub abstract_text: String,
  /// Abstract page
  pub url:           String,
  /// PDF link
  pub pdf_url:       Option<String>,
}

impl From<&Paper> for PaperView {
  fn from(paper: &Paper) -> Self {
    Self {
      title:         paper.title.clone(),
      authors:       paper.authors.iter().map(|a| a.name.clone()).collect(),
      published:     paper.published,
      summary:       None,
      abstract_text: paper.abstract_text.clone(),
      url:           paper.url.clone(),
      pdf_url:       paper.pdf_url.clone(),
    }
  }
}

/// Extracts a version-less arXiv identifier from a bare identifier or an arXiv URL.
///
/// Accepts new-style ("2301.07041", "2301.07041v3") and old-style ("math.AG/0601001")
/// identifiers, optionally behind `.../abs/` or `.../pdf/`.
pub fn normalize_arxiv_id(input: &str) -> Option<String> {
  lazy_static! {
    static ref ARXIV_ID: Regex = Regex::new(
      r"^(?:https?://(?:export\.)?arxiv\.org/(?:abs|pdf)/)?(\d{4}\.\d{4,5}|[a-zA-Z-]+(?:\.[A-Z]{2})?/\d{7})(?:v\d+)?(?:\.pdf)?$"
    )
    .unwrap();
  }
  ARXIV_ID.captures(input.trim()).and_then(|cap| cap.get(1)).map(|m| m.as_str().to_string())
}

/// Store key for a caller-supplied identifier: the normalized id when it parses, else the
/// trimmed input, which then simply matches nothing.
pub(crate) fn arxiv_key(input: &str) -> String {
  normalize_arxiv_id(input).unwrap_or_else(|| input.trim().to_string())
}

/// Collapses runs of whitespace (arXiv wraps titles and abstracts across lines).
pub(crate) fn normalize_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
