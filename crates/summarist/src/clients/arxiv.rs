//! Client for the arXiv Atom query API.
//!
//! Feeds are deserialized with `quick-xml`'s serde support into loosely typed entries (every
//! field optional) and then converted one by one. An entry that is missing a required field,
//! carries an unparseable date, or is one of arXiv's in-band error entries is skipped with a
//! warning, so a single bad record never costs the rest of the page.

use std::time::Duration;

use url::Url;

use super::*;
use crate::config::IndexConfig;

/// Paper index backed by `export.arxiv.org`.
///
/// The underlying HTTP client is built once, with the configured timeout, and reused for every
/// request.
#[derive(Debug, Clone)]
pub struct ArxivClient {
  /// Shared HTTP client
  client:   reqwest::Client,
  /// Query endpoint, e.g. `https://export.arxiv.org/api/query`
  base_url: Url,
}

/// Top level of an Atom feed. Feed metadata other than entries is ignored.
#[derive(Debug, Deserialize)]
struct Feed {
  /// Result entries
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// One Atom entry, before validation.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Abstract page URL, including the version suffix
  id:         Option<String>,
  /// Title, possibly wrapped across lines
  title:      Option<String>,
  /// The abstract
  summary:    Option<String>,
  /// RFC 3339 submission timestamp of the first version
  published:  Option<String>,
  /// Authors
  #[serde(rename = "author", default)]
  authors:    Vec<EntryAuthor>,
  /// Category tags, primary first
  #[serde(rename = "category", default)]
  categories: Vec<EntryCategory>,
  /// Related links
  #[serde(rename = "link", default)]
  links:      Vec<EntryLink>,
}

/// An entry's `<author>` element.
#[derive(Debug, Deserialize)]
struct EntryAuthor {
  /// Author's display name
  name: Option<String>,
}

/// An entry's `<category>` element.
#[derive(Debug, Deserialize)]
struct EntryCategory {
  /// Category code
  #[serde(rename = "@term")]
  term: Option<String>,
}

/// An entry's `<link>` element.
#[derive(Debug, Deserialize)]
struct EntryLink {
  /// Target
  #[serde(rename = "@href")]
  href:       Option<String>,
  /// `pdf` for the PDF link
  #[serde(rename = "@title", default)]
  title:      Option<String>,
  /// MIME type of the target
  #[serde(rename = "@type", default)]
  media_type: Option<String>,
}

impl Entry {
  /// Validates the entry, using `fallback_category` when it carries no category tags.
  fn into_paper(self, fallback_category: Option<&str>) -> core::result::Result<Paper, String> {
    let id_url = non_blank(self.id).ok_or_else(|| "missing id".to_string())?;
    let arxiv_id = id_url
      .contains("/abs/")
      .then(|| normalize_arxiv_id(&id_url))
      .flatten()
      .ok_or_else(|| format!("unrecognized id {id_url}"))?;

    let title = non_blank(self.title).ok_or_else(|| format!("{arxiv_id}: missing title"))?;
    let abstract_text =
      non_blank(self.summary).ok_or_else(|| format!("{arxiv_id}: missing abstract"))?;
    let published =
      non_blank(self.published).ok_or_else(|| format!("{arxiv_id}: missing published date"))?;
    let published = DateTime::parse_from_rfc3339(&published)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(|e| format!("{arxiv_id}: invalid published date {published:?}: {e}"))?;

    let category = self
      .categories
      .into_iter()
      .find_map(|c| non_blank(c.term))
      .or_else(|| fallback_category.map(str::to_string))
      .ok_or_else(|| format!("{arxiv_id}: missing category"))?;

    let pdf_url = self
      .links
      .into_iter()
      .find(|link| {
        link.title.as_deref() == Some("pdf") || link.media_type.as_deref() == Some("application/pdf")
      })
      .and_then(|link| non_blank(link.href));

    let authors = self
      .authors
      .into_iter()
      .filter_map(|a| non_blank(a.name))
      .map(|name| Author { name: normalize_whitespace(&name) })
      .collect();

    Ok(Paper {
      arxiv_id,
      title: normalize_whitespace(&title),
      authors,
      abstract_text: normalize_whitespace(&abstract_text),
      category,
      published,
      url: id_url,
      pdf_url,
    })
  }
}

/// Trims and drops empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parses an Atom feed body into papers, skipping entries that do not validate.
///
/// Fails only when the document as a whole cannot be read.
pub fn parse_feed(body: &str, fallback_category: Option<&str>) -> Result<Vec<Paper>> {
  let feed: Feed = quick_xml::de::from_str(body)
    .map_err(|e| SummaristError::Upstream(format!("unreadable arXiv feed: {e}")))?;

  let total = feed.entries.len();
  let papers: Vec<Paper> = feed
    .entries
    .into_iter()
    .filter_map(|entry| match entry.into_paper(fallback_category) {
      Ok(paper) => Some(paper),
      Err(reason) => {
        warn!("Skipping malformed arXiv entry: {reason}");
        None
      },
    })
    .collect();

  debug!("Parsed {} of {} arXiv entries", papers.len(), total);
  Ok(papers)
}

impl ArxivClient {
  /// Creates a client for the public arXiv endpoint with a 30 second timeout.
  pub fn new() -> Result<Self> { Self::with_config(&IndexConfig::default()) }

  /// Creates a client from configuration.
  pub fn with_config(config: &IndexConfig) -> Result<Self> {
    let base_url = Url::parse(&config.base_url).map_err(|e| {
      SummaristError::Config(format!("invalid index base_url {:?}: {e}", config.base_url))
    })?;
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("summarist/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client, base_url })
  }

  /// Builds the request URL for a search whose window ends at `now`.
  pub fn search_url(&self, query: &SearchQuery, now: DateTime<Utc>) -> Url {
    let mut url = self.base_url.clone();
    url
      .query_pairs_mut()
      .append_pair("search_query", &query.search_query(now))
      .append_pair("start", "0")
      .append_pair("max_results", &query.max_results().to_string())
      .append_pair("sortBy", "submittedDate")
      .append_pair("sortOrder", "descending");
    url
  }

  /// Builds the request URL for a single-identifier lookup.
  pub fn lookup_url(&self, arxiv_id: &str) -> Url {
    let mut url = self.base_url.clone();
    url.query_pairs_mut().append_pair("id_list", arxiv_id).append_pair("max_results", "1");
    url
  }

  /// Fetches a feed body, turning non-success statuses into upstream errors.
  async fn get(&self, url: Url) -> Result<String> {
    debug!("Requesting {url}");
    let response = self.client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(SummaristError::Upstream(format!("arXiv returned HTTP {status}")));
    }
    let body = response.text().await?;
    trace!("arXiv response body: {body}");
    Ok(body)
  }
}

#[async_trait]
impl PaperIndex for ArxivClient {
  async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>> {
    if query.max_results() == 0 {
      return Ok(Vec::new());
    }
    let body = self.get(self.search_url(query, Utc::now())).await?;
    parse_feed(&body, Some(query.category()))
  }

  async fn fetch_by_id(&self, arxiv_id: &str) -> Result<Paper> {
    let arxiv_id = normalize_arxiv_id(arxiv_id).ok_or(SummaristError::NotFound)?;
    let body = self.get(self.lookup_url(&arxiv_id)).await?;
    parse_feed(&body, None)?
      .into_iter()
      .find(|paper| paper.arxiv_id == arxiv_id)
      .ok_or(SummaristError::NotFound)
  }
}
