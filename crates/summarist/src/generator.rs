//! Summary generation from paper abstracts.
//!
//! The model is asked for four labelled lines and the reply is read back by label, not by
//! position: bullets, bold markers, ordering, preamble and wrapped lines are all tolerated. A
//! reply missing any of the four labels is reported as [`Degradation::Unparseable`]; a failed
//! model call as [`Degradation::Upstream`]. [`SummaryGenerator::generate`] never fails.

use lazy_static::lazy_static;
use regex::Regex;

use super::*;
use crate::llm::LanguageModel;

/// Instruction sent as the system message for every summary.
pub const SYSTEM_PROMPT: &str = "You are a helpful research assistant. Please analyze the \
                                 following paper abstract and provide a summary in the following \
                                 format:\n- Observation: Key problem or issues identified\n- \
                                 Objective: Research goal or intended solution\n- Challenge: Main \
                                 technical or conceptual difficulties\n- Main Idea: The proposed \
                                 approach or technique";

/// Produces [`Generation`]s from abstracts with an injected language model.
#[derive(Clone)]
pub struct SummaryGenerator {
  /// The model, shared for the life of the generator
  model: Arc<dyn LanguageModel>,
}

impl SummaryGenerator {
  /// Creates a generator around `model`.
  pub fn new(model: Arc<dyn LanguageModel>) -> Self { Self { model } }

  /// Asks the model to summarize `abstract_text`.
  pub async fn generate(&self, abstract_text: &str, credential: &str) -> Generation {
    match self.model.complete(SYSTEM_PROMPT, abstract_text, credential).await {
      Ok(reply) => {
        trace!("Model reply: {reply}");
        match parse_summary(&reply) {
          Ok(fields) => Generation::Succeeded(fields),
          Err(reason) => {
            warn!("Degraded summary: {reason}");
            Generation::Degraded(Degradation::Unparseable(reason))
          },
        }
      },
      Err(e) => {
        warn!("Degraded summary, model call failed: {e}");
        Generation::Degraded(Degradation::Upstream(e.to_string()))
      },
    }
  }
}

/// Which of the four fields a line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
  /// Key problem
  Observation,
  /// Research goal
  Objective,
  /// Difficulties
  Challenge,
  /// Proposed approach
  MainIdea,
}

impl Field {
  /// Every field, in canonical order.
  const ALL: [Field; 4] = [Field::Observation, Field::Objective, Field::Challenge, Field::MainIdea];

  /// Recognizes a label, ignoring case, spacing and plurals.
  fn from_label(label: &str) -> Option<Self> {
    let label: String =
      label.chars().filter(|c| c.is_ascii_alphabetic()).collect::<String>().to_ascii_lowercase();
    match label.as_str() {
      "observation" | "observations" => Some(Field::Observation),
      "objective" | "objectives" => Some(Field::Objective),
      "challenge" | "challenges" => Some(Field::Challenge),
      "mainidea" | "mainideas" => Some(Field::MainIdea),
      _ => None,
    }
  }

  /// Canonical display label.
  fn label(self) -> &'static str {
    match self {
      Field::Observation => OBSERVATION_LABEL,
      Field::Objective => OBJECTIVE_LABEL,
      Field::Challenge => CHALLENGE_LABEL,
      Field::MainIdea => MAIN_IDEA_LABEL,
    }
  }

  /// Slot in the value array.
  fn index(self) -> usize { self as usize }
}

lazy_static! {
  /// A labelled line: optional bullet or numbering, optional emphasis, label, colon, text.
  static ref LABELLED_LINE: Regex = Regex::new(
    r"(?i)^\s*(?:[-*•]+|\d+[.)])?\s*(?:\*\*|__|#+\s*)?\s*(observations?|objectives?|challenges?|main[ _-]?ideas?)\s*(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(.*)$"
  )
  .unwrap();
}

/// Extracts the four labelled fields from a model reply.
///
/// Returns a description of what is missing when any field is absent or empty.
pub fn parse_summary(reply: &str) -> core::result::Result<SummaryFields, String> {
  let mut values: [Option<String>; 4] = Default::default();
  let mut current: Option<Field> = None;

  for line in reply.lines() {
    if let Some(captures) = LABELLED_LINE.captures(line) {
      let field = Field::from_label(&captures[1]);
      current = match field {
        Some(field) if values[field.index()].is_none() => {
          values[field.index()] = Some(captures[2].trim().to_string());
          Some(field)
        },
        // A repeated label neither overwrites nor extends the first occurrence.
        _ => None,
      };
      continue;
    }

    let text = line.trim();
    if text.is_empty() {
      current = None;
      continue;
    }
    if let Some(field) = current {
      if let Some(value) = values[field.index()].as_mut() {
        if !value.is_empty() {
          value.push(' ');
        }
        value.push_str(text);
      }
    }
  }

  let values = values.map(|value| value.map(|v| strip_emphasis(&v)).filter(|v| !v.is_empty()));
  let missing: Vec<&str> =
    Field::ALL.iter().filter(|f| values[f.index()].is_none()).map(|f| f.label()).collect();
  if !missing.is_empty() {
    return Err(format!("missing labels: {}", missing.join(", ")));
  }

  let [Some(observation), Some(objective), Some(challenge), Some(main_idea)] = values else {
    return Err("missing labels".to_string());
  };
  Ok(SummaryFields { observation, objective, challenge, main_idea })
}

/// Drops stray markdown emphasis left around a value.
fn strip_emphasis(value: &str) -> String {
  value.trim().trim_matches(|c| c == '*' || c == '_').trim().to_string()
}
