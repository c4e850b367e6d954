//! Structured paper summaries and the outcome of generating one.
//!
//! Generation is total: a [`Generation`] is either [`Generation::Succeeded`] with the four
//! extracted fields or [`Generation::Degraded`] with the reason it could not be produced. Both
//! convert into a displayable [`Summary`], so callers never have to treat a failed model call as
//! a fatal error.

use super::*;

/// Label preceding the observation line in a model reply.
pub const OBSERVATION_LABEL: &str = "Observation";
/// Label preceding the objective line in a model reply.
pub const OBJECTIVE_LABEL: &str = "Objective";
/// Label preceding the challenge line in a model reply.
pub const CHALLENGE_LABEL: &str = "Challenge";
/// Label preceding the main idea line in a model reply.
pub const MAIN_IDEA_LABEL: &str = "Main Idea";

/// A four-field digest of a paper's abstract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
  /// Key problem or issues identified
  pub observation:  String,
  /// Research goal or intended solution
  pub objective:    String,
  /// Main technical or conceptual difficulties
  pub challenge:    String,
  /// The proposed approach or technique
  pub main_idea:    String,
  /// When the summary was produced
  pub generated_at: DateTime<Utc>,
}

/// The four text fields extracted from a successful model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFields {
  /// Key problem or issues identified
  pub observation: String,
  /// Research goal or intended solution
  pub objective:   String,
  /// Main technical or conceptual difficulties
  pub challenge:   String,
  /// The proposed approach or technique
  pub main_idea:   String,
}

/// Why a summary could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
  /// The model service could not be reached or returned an error.
  Upstream(String),
  /// The model answered, but its reply did not carry the expected labelled fields.
  Unparseable(String),
}

impl Display for Degradation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Degradation::Upstream(reason) => write!(f, "model request failed: {reason}"),
      Degradation::Unparseable(reason) => write!(f, "model reply unparseable: {reason}"),
    }
  }
}

/// Outcome of a summary generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
  /// All four fields were extracted.
  Succeeded(SummaryFields),
  /// Nothing usable was produced.
  Degraded(Degradation),
}

impl Generation {
  /// Whether the generation produced real content.
  pub fn is_succeeded(&self) -> bool { matches!(self, Generation::Succeeded(_)) }

  /// Converts into a [`Summary`] stamped now, substituting placeholder text when degraded.
  pub fn into_summary(self) -> Summary {
    let fields = match self {
      Generation::Succeeded(fields) => fields,
      Generation::Degraded(Degradation::Upstream(reason)) => SummaryFields {
        observation: "Summary generation failed".to_string(),
        objective:   "Error occurred while processing".to_string(),
        challenge:   reason,
        main_idea:   "Please try again later".to_string(),
      },
      Generation::Degraded(Degradation::Unparseable(reason)) => SummaryFields {
        observation: "Summary could not be parsed".to_string(),
        objective:   "The model reply did not follow the expected format".to_string(),
        challenge:   reason,
        main_idea:   "Please try again later".to_string(),
      },
    };
    Summary {
      observation:  fields.observation,
      objective:    fields.objective,
      challenge:    fields.challenge,
      main_idea:    fields.main_idea,
      generated_at: Utc::now(),
    }
  }
}
