//! On-disk configuration.
//!
//! Configuration lives in a single TOML file, by default at
//! `<config dir>/summarist/config.toml`. Every section and field has a default, so an empty or
//! partial file is valid:
//!
//! ```toml
//! database_path = "/home/me/.local/share/summarist/summarist.db"
//!
//! [index]
//! base_url = "https://export.arxiv.org/api/query"
//! timeout_secs = 30
//!
//! [model]
//! endpoint = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-4"
//! timeout_secs = 60
//!
//! [access]
//! minimum_tier = "basic"
//!
//! [user]
//! id = "me"
//! tier = "premium"
//! preferences = [{ category = "cs.CV" }, { category = "cs.RO", subtopic = "grasping" }]
//! ```
//!
//! The model credential may be given as `model.api_key`, but is usually taken from the
//! `SUMMARIST_API_KEY` or `OPENAI_API_KEY` environment variables.

use crate::{
  database::Database,
  user::{Preference, Tier, User},
};

use super::*;

/// Environment variables consulted, in order, for the model credential.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["SUMMARIST_API_KEY", "OPENAI_API_KEY"];

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// SQLite database file
  pub database_path: PathBuf,
  /// Paper index settings
  pub index:         IndexConfig,
  /// Language-model settings
  pub model:         ModelConfig,
  /// Summary access policy
  pub access:        AccessConfig,
  /// The local reader
  pub user:          UserConfig,
}

/// Settings for the arXiv client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
  /// Query endpoint
  pub base_url:     String,
  /// Per-request timeout
  pub timeout_secs: u64,
}

/// Settings for the chat-completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
  /// Chat-completions URL
  pub endpoint:     String,
  /// Model name
  pub model:        String,
  /// Per-request timeout
  pub timeout_secs: u64,
  /// Default credential, used when a caller supplies none
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_key:      Option<String>,
}

/// Who may request summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
  /// Lowest tier allowed to see summaries; everyone when unset
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minimum_tier: Option<Tier>,
}

/// The local reader, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
  /// Identifier used for bookmarks and history
  pub id:          String,
  /// Subscription tier
  pub tier:        Tier,
  /// Topical preferences
  pub preferences: Vec<Preference>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_path: Database::default_path(),
      index:         IndexConfig::default(),
      model:         ModelConfig::default(),
      access:        AccessConfig::default(),
      user:          UserConfig::default(),
    }
  }
}

impl Default for IndexConfig {
  fn default() -> Self {
    Self { base_url: "https://export.arxiv.org/api/query".to_string(), timeout_secs: 30 }
  }
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      endpoint:     "https://api.openai.com/v1/chat/completions".to_string(),
      model:        "gpt-4".to_string(),
      timeout_secs: 60,
      api_key:      None,
    }
  }
}

impl Default for UserConfig {
  fn default() -> Self { Self { id: "local".to_string(), tier: Tier::Free, preferences: Vec::new() } }
}

impl UserConfig {
  /// The configured reader as a [`User`].
  pub fn to_user(&self) -> User {
    User { id: self.id.clone(), tier: self.tier, preferences: self.preferences.clone() }
  }
}

impl Config {
  /// Default location of the configuration file.
  ///
  /// - On Unix: `~/.config/summarist/config.toml`
  /// - On macOS: `~/Library/Application Support/summarist/config.toml`
  /// - On Windows: `%APPDATA%\summarist\config.toml`
  /// - Fallback: `./summarist/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("summarist").join("config.toml")
  }

  /// Reads configuration from `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(toml::from_str(&content)?)
  }

  /// Reads the default configuration file, or returns defaults when there is none.
  pub fn load_or_default() -> Result<Self> { Self::load_or_default_from(Self::default_path()) }

  /// Reads `path`, or returns defaults when it does not exist.
  pub fn load_or_default_from(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      debug!("Loading configuration from {}", path.display());
      Self::load(path)
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes the configuration to `path`, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Sets the database location.
  pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
    self.database_path = path.as_ref().to_path_buf();
    self
  }

  /// Sets the default model credential.
  pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
    self.model.api_key = Some(api_key.into());
    self
  }

  /// The default model credential: `model.api_key`, else the first non-empty credential
  /// environment variable.
  pub fn credential(&self) -> Option<String> {
    self.model.api_key.clone().filter(|key| !key.trim().is_empty()).or_else(|| {
      CREDENTIAL_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
    })
  }
}
