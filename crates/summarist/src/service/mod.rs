//! The services built on top of the store, the index and the model.
//!
//! - [`Library`]: filtered, paginated reads of stored papers; never touches the network
//! - [`Ingestor`]: searches the index and, on refresh, persists what it finds
//! - [`SummaryService`]: serves cached summaries and generates missing ones
//! - [`Engagement`]: bookmarks and reading history
//!
//! [`Summarist`] wires all four from a [`Config`]. Every service is cheap to clone and shares one
//! [`Database`].
//!
//! # Examples
//!
//! ```no_run
//! use summarist::{user::User, Config, Summarist};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let summarist = Summarist::builder().with_config(Config::default()).build().await?;
//! let user = User::new("me");
//! for paper in summarist.library.list_papers(&user, Some("cs.RO"), None, 0, 10).await? {
//!   println!("{}", paper.title);
//! }
//! # Ok(())
//! # }
//! ```

use crate::{
  clients::{ArxivClient, PaperIndex},
  database::Database,
  generator::SummaryGenerator,
  llm::{ChatClient, LanguageModel},
};

use super::*;

mod engagement;
mod ingest;
mod listing;
mod summaries;

pub use self::{
  engagement::Engagement,
  ingest::Ingestor,
  listing::{Library, DEFAULT_LIMIT, DEFAULT_SKIP},
  summaries::{SummaryService, NO_CREDENTIAL},
};

/// Decides whether a reader may see a paper's summary.
pub trait AccessPolicy: Send + Sync {
  /// Returns [`SummaristError::AccessDenied`] when `user` may not see summaries of `paper`.
  fn check(&self, user: &User, paper: &Paper) -> Result<()>;
}

/// Everyone may see every summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl AccessPolicy for OpenAccess {
  fn check(&self, _user: &User, _paper: &Paper) -> Result<()> { Ok(()) }
}

/// Summaries require at least the given tier.
#[derive(Debug, Clone, Copy)]
pub struct MinimumTier(pub Tier);

impl AccessPolicy for MinimumTier {
  fn check(&self, user: &User, _paper: &Paper) -> Result<()> {
    if user.tier >= self.0 {
      Ok(())
    } else {
      Err(SummaristError::AccessDenied(format!(
        "summaries require the {} tier or above, {} is on {}",
        self.0, user.id, user.tier
      )))
    }
  }
}

/// All services, wired from one configuration.
pub struct Summarist {
  /// Configuration the services were built from
  pub config:     Config,
  /// Shared store
  pub database:   Arc<Database>,
  /// Stored-paper listings
  pub library:    Library,
  /// Index searches and refreshes
  pub ingestor:   Ingestor,
  /// Cached summaries
  pub summaries:  SummaryService,
  /// Bookmarks and history
  pub engagement: Engagement,
}

impl Summarist {
  /// Starts building a [`Summarist`].
  pub fn builder() -> SummaristBuilder { SummaristBuilder::default() }
}

/// Builder for [`Summarist`]; collaborators not supplied are built from the configuration.
#[derive(Default)]
pub struct SummaristBuilder {
  /// Configuration; defaults when unset
  config: Option<Config>,
  /// Paper index override
  index:  Option<Arc<dyn PaperIndex>>,
  /// Language model override
  model:  Option<Arc<dyn LanguageModel>>,
  /// Access policy override
  policy: Option<Arc<dyn AccessPolicy>>,
}

impl SummaristBuilder {
  /// Uses `config`.
  pub fn with_config(mut self, config: Config) -> Self {
    self.config = Some(config);
    self
  }

  /// Uses `index` instead of an [`ArxivClient`].
  pub fn with_index(mut self, index: Arc<dyn PaperIndex>) -> Self {
    self.index = Some(index);
    self
  }

  /// Uses `model` instead of a [`ChatClient`].
  pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
    self.model = Some(model);
    self
  }

  /// Uses `policy` instead of the configured tier requirement.
  pub fn with_access_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
    self.policy = Some(policy);
    self
  }

  /// Opens the database and assembles the services.
  pub async fn build(self) -> Result<Summarist> {
    let config = self.config.unwrap_or_default();
    let database = Arc::new(Database::open(&config.database_path).await?);

    let index: Arc<dyn PaperIndex> = match self.index {
      Some(index) => index,
      None => Arc::new(ArxivClient::with_config(&config.index)?),
    };
    let model: Arc<dyn LanguageModel> = match self.model {
      Some(model) => model,
      None => Arc::new(ChatClient::new(&config.model)?),
    };
    let policy: Arc<dyn AccessPolicy> = match (self.policy, config.access.minimum_tier) {
      (Some(policy), _) => policy,
      (None, Some(tier)) => Arc::new(MinimumTier(tier)),
      (None, None) => Arc::new(OpenAccess),
    };

    let ingestor = Ingestor::new(database.clone(), index);
    let summaries = SummaryService::new(
      database.clone(),
      ingestor.clone(),
      SummaryGenerator::new(model),
      policy,
      config.credential(),
    );

    Ok(Summarist {
      library: Library::new(database.clone()),
      engagement: Engagement::new(database.clone()),
      ingestor,
      summaries,
      database,
      config,
    })
  }
}
