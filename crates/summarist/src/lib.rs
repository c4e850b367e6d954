//! Recent research papers with cached, structured language-model summaries.
//!
//! `summarist` is a library for following the newest arXiv submissions in the categories you
//! care about, providing:
//!
//! - Time-bounded category searches against the arXiv index
//! - A local paper store keyed by arXiv identifier
//! - Four-field summaries (observation, objective, challenge, main idea) generated once per
//!   paper by a language model and cached thereafter
//! - Bookmarks and reading history
//! - Filtering by the reader's topical preferences
//!
//! # Getting Started
//!
//! ```no_run
//! use summarist::{clients::SearchQuery, prelude::*, Config, Summarist};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let summarist = Summarist::builder().with_config(Config::load_or_default()?).build().await?;
//!
//!   // Pull the last week of computer vision papers into the local store
//!   let papers = summarist.ingestor.refresh(&SearchQuery::new("cs.CV", 10, 7)).await?;
//!
//!   // Summaries are generated on first request and cached afterwards
//!   let user = summarist.config.user.to_user();
//!   let summary = summarist.summaries.get_summary(&papers[0].arxiv_id, &user, None).await?;
//!   println!("{}", summary.main_idea);
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`clients`]: The external paper index (arXiv) and its search window
//! - [`llm`]: Chat-completion client for the summary model
//! - [`generator`]: Prompting and label-keyed parsing of summaries
//! - [`database`]: Persistent store and its instructions
//! - [`service`]: Listing, summary caching, ingestion and engagement tracking
//! - [`config`]: On-disk configuration
//! - [`user`]: The reader, their tier and preferences
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod category;
pub mod clients;
pub mod config;
pub mod database;
pub mod error;
pub mod generator;
pub mod llm;
pub mod paper;
pub mod service;
pub mod summary;
pub mod user;

pub use crate::{
  config::Config,
  service::{Summarist, SummaristBuilder},
};
use crate::{error::*, paper::*, summary::*, user::*};

/// Common traits and types for ergonomic imports.
///
/// # Usage
///
/// ```no_run
/// use summarist::{database::Database, prelude::*};
///
/// async fn example() -> Result<(), SummaristError> {
///   let db = Database::open(Database::default_path()).await?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    clients::PaperIndex, database::DatabaseInstruction, error::SummaristError,
    llm::LanguageModel, service::AccessPolicy,
  };
}
