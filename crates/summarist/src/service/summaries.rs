//! Cache-or-generate access to summaries.

use std::time::Duration;

use super::*;
use crate::database::{DatabaseInstruction, GetSummary, PutSummary, Query, Track};

/// How many times a freshly stored summary is re-read before giving up.
const STORE_ATTEMPTS: u32 = 3;

/// Reason carried by the placeholder served when no credential resolves.
pub const NO_CREDENTIAL: &str = "no model credential configured";

/// Serves summaries, generating each at most once.
#[derive(Clone)]
pub struct SummaryService {
  /// Shared store
  db:                 Arc<Database>,
  /// Used to fetch papers that are not stored yet
  ingestor:           Ingestor,
  /// Model-backed generator
  generator:          SummaryGenerator,
  /// Tier gating
  policy:             Arc<dyn AccessPolicy>,
  /// Credential used when a caller supplies none
  default_credential: Option<String>,
}

impl SummaryService {
  /// Creates the service.
  pub fn new(
    db: Arc<Database>,
    ingestor: Ingestor,
    generator: SummaryGenerator,
    policy: Arc<dyn AccessPolicy>,
    default_credential: Option<String>,
  ) -> Self {
    Self { db, ingestor, generator, policy, default_credential }
  }

  /// The summary of a stored paper, on behalf of `user`.
  ///
  /// In order:
  /// 1. [`SummaristError::NotFound`] if the paper is not stored.
  /// 2. [`SummaristError::AccessDenied`] if the access policy refuses the reader.
  /// 3. A cached summary is returned as is.
  /// 4. Without a credential, an uncached placeholder degraded with [`NO_CREDENTIAL`].
  /// 5. Otherwise a summary is generated and cached, degraded or not. If another request cached
  ///    one first, that one is returned instead.
  ///
  /// Serving a cached or newly cached summary records a read for the reader.
  pub async fn get_summary(
    &self,
    arxiv_id: &str,
    user: &User,
    credential: Option<&str>,
  ) -> Result<Summary> {
    let paper = Query::by_arxiv_id(&arxiv_key(arxiv_id))
      .execute(&self.db)
      .await?
      .into_iter()
      .next()
      .ok_or(SummaristError::NotFound)?;

    self.policy.check(user, &paper)?;

    let (summary, cached) = self.cached_or_generate(&paper, credential).await?;
    if cached {
      Track::read(&user.id, &paper.arxiv_id).execute(&self.db).await?;
    }
    Ok(summary)
  }

  /// The summary of any arXiv paper, fetching the paper from the index if it is not stored.
  ///
  /// Requires a credential up front even when the summary turns out to be cached. No access
  /// policy applies and no read is recorded.
  pub async fn generated_summary(&self, arxiv_id: &str, credential: Option<&str>) -> Result<Summary> {
    let credential = self.credential(credential)?;
    let paper = self.ingestor.fetch(arxiv_id).await?;
    let (summary, _) = self.cached_or_generate(&paper, Some(&credential)).await?;
    Ok(summary)
  }

  /// The caller's credential, else the default one.
  fn credential(&self, credential: Option<&str>) -> Result<String> {
    credential
      .map(str::trim)
      .filter(|c| !c.is_empty())
      .map(str::to_string)
      .or_else(|| self.default_credential.clone())
      .ok_or(SummaristError::Unauthorized)
  }

  /// Returns the cached summary, or generates and caches one. The flag says whether the result
  /// is cached; only the no-credential placeholder is not.
  async fn cached_or_generate(
    &self,
    paper: &Paper,
    credential: Option<&str>,
  ) -> Result<(Summary, bool)> {
    if let Some(summary) = GetSummary::of(&paper.arxiv_id).execute(&self.db).await? {
      trace!("Summary cache hit for {}", paper.arxiv_id);
      return Ok((summary, true));
    }

    let Ok(credential) = self.credential(credential) else {
      warn!("No model credential, serving placeholder summary for {}", paper.arxiv_id);
      let placeholder = Generation::Degraded(Degradation::Upstream(NO_CREDENTIAL.to_string()));
      return Ok((placeholder.into_summary(), false));
    };

    debug!("Generating summary for {}", paper.arxiv_id);
    let generation = self.generator.generate(&paper.abstract_text, &credential).await;
    let candidate = generation.into_summary();
    for attempt in 1..=STORE_ATTEMPTS {
      if let Some(stored) = PutSummary::new(&paper.arxiv_id, &candidate).execute(&self.db).await? {
        return Ok((stored, true));
      }
      warn!("Stored summary for {} not visible (attempt {attempt})", paper.arxiv_id);
      tokio::time::sleep(Duration::from_millis(20 * u64::from(attempt))).await;
    }
    Err(SummaristError::SummaryNotStored(paper.arxiv_id.clone()))
  }
}
