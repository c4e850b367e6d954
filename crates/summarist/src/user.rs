//! The reader on whose behalf operations run.
//!
//! Users are owned by an external identity system; this crate only reads their identifier,
//! subscription tier and topical preferences.

use super::*;

/// Subscription tier, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  /// No subscription
  #[default]
  Free,
  /// Entry-level subscription
  Basic,
  /// Full subscription
  Premium,
}

impl Display for Tier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Tier::Free => write!(f, "free"),
      Tier::Basic => write!(f, "basic"),
      Tier::Premium => write!(f, "premium"),
    }
  }
}

impl FromStr for Tier {
  type Err = SummaristError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "free" => Ok(Tier::Free),
      "basic" => Ok(Tier::Basic),
      "premium" => Ok(Tier::Premium),
      other => Err(SummaristError::Config(format!("unknown tier {other:?}"))),
    }
  }
}

/// A topical interest: an arXiv category, optionally narrowed to a subtopic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
  /// Category code
  pub category: String,
  /// Subtopic tag within the category
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub subtopic: Option<String>,
}

impl Preference {
  /// A preference for a whole category.
  pub fn category(category: impl Into<String>) -> Self {
    Self { category: category.into(), subtopic: None }
  }

  /// Narrows the preference to a subtopic.
  pub fn with_subtopic(mut self, subtopic: impl Into<String>) -> Self {
    self.subtopic = Some(subtopic.into());
    self
  }
}

/// Read-only view of the current reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  /// Stable identifier
  pub id:          String,
  /// Subscription tier
  pub tier:        Tier,
  /// Topical preferences, OR'd together when listing
  pub preferences: Vec<Preference>,
}

impl User {
  /// A free-tier user without preferences.
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into(), tier: Tier::Free, preferences: Vec::new() }
  }

  /// Sets the tier.
  pub fn with_tier(mut self, tier: Tier) -> Self {
    self.tier = tier;
    self
  }

  /// Adds a preference.
  pub fn with_preference(mut self, preference: Preference) -> Self {
    self.preferences.push(preference);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tier_ordering_and_parsing() {
    assert!(Tier::Free < Tier::Basic && Tier::Basic < Tier::Premium);
    assert_eq!("Premium".parse::<Tier>().unwrap(), Tier::Premium);
    assert!("gold".parse::<Tier>().is_err());
    assert_eq!(Tier::Basic.to_string(), "basic");
  }
}
