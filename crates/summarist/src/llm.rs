//! Client for OpenAI-compatible chat-completion services.
//!
//! Summaries are produced by a single chat exchange: one system instruction and one user
//! message. [`ChatRequest`] builds that exchange, [`ChatClient`] sends it, and the
//! [`LanguageModel`] trait lets the summary generator stay ignorant of HTTP so tests can drop in
//! a scripted model.
//!
//! # Examples
//!
//! ```no_run
//! use summarist::{config::ModelConfig, llm::ChatClient, prelude::*};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ChatClient::new(&ModelConfig::default())?;
//! let reply = client
//!   .complete("You are a helpful research assistant.", "What is a transformer?", "sk-...")
//!   .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use url::Url;

use super::*;
use crate::config::ModelConfig;

/// Something that answers a system instruction plus a user message with text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
  /// Sends one exchange and returns the reply text.
  ///
  /// `credential` is the bearer token for the service.
  async fn complete(&self, system: &str, user: &str, credential: &str) -> Result<String>;
}

/// Message structure for chat interactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  /// `system`, `user` or `assistant`
  pub role:    String,
  /// Message text
  pub content: String,
}

/// Request builder for chat completions.
///
/// # Examples
///
/// ```
/// use summarist::llm::ChatRequest;
///
/// let request = ChatRequest::new()
///   .with_model("gpt-4")
///   .with_system("Answer tersely.")
///   .with_message("What is the capital of France?");
/// assert_eq!(request.messages.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
  /// Model name; required before sending
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model:       Option<String>,
  /// Conversation, in order
  pub messages:    Vec<Message>,
  /// Sampling temperature
  pub temperature: f64,
}

// NOTE: low temperature keeps the labelled format stable.
impl Default for ChatRequest {
  fn default() -> Self { Self { model: None, messages: Vec::new(), temperature: 0.3 } }
}

impl ChatRequest {
  /// Creates an empty request.
  pub fn new() -> Self { Self::default() }

  /// Sets the model.
  pub fn with_model(mut self, model: &str) -> Self {
    self.model.replace(model.to_string());
    self
  }

  /// Appends a system instruction.
  pub fn with_system(mut self, content: &str) -> Self {
    self.messages.push(Message { role: "system".to_string(), content: content.to_string() });
    self
  }

  /// Appends a user message.
  pub fn with_message(mut self, content: &str) -> Self {
    self.messages.push(Message { role: "user".to_string(), content: content.to_string() });
    self
  }

  /// Checks the request is complete enough to send.
  fn validate(&self) -> Result<()> {
    if self.model.as_deref().map_or(true, str::is_empty) {
      return Err(SummaristError::Config("chat request has no model".into()));
    }
    if self.messages.is_empty() {
      return Err(SummaristError::Config("chat request has no messages".into()));
    }
    Ok(())
  }
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
  /// The generated message
  pub message: Message,
}

/// Response body of a chat completion.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
  /// Generated alternatives; the first is used
  #[serde(default)]
  pub choices: Vec<Choice>,
}

impl ChatResponse {
  /// Text of the first choice.
  pub fn content(&self) -> Option<&str> {
    self.choices.first().map(|choice| choice.message.content.as_str())
  }
}

/// Chat-completion client holding one reusable HTTP client.
#[derive(Debug, Clone)]
pub struct ChatClient {
  /// Shared HTTP client
  client:   reqwest::Client,
  /// Full chat-completions URL
  endpoint: Url,
  /// Model name sent with every request
  model:    String,
}

impl ChatClient {
  /// Builds a client from configuration.
  pub fn new(config: &ModelConfig) -> Result<Self> {
    let endpoint = Url::parse(&config.endpoint).map_err(|e| {
      SummaristError::Config(format!("invalid model endpoint {:?}: {e}", config.endpoint))
    })?;
    let client =
      reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Self { client, endpoint, model: config.model.clone() })
  }

  /// Sends a prepared request.
  pub async fn send(&self, request: &ChatRequest, credential: &str) -> Result<ChatResponse> {
    request.validate()?;
    debug!("Sending chat request to {} with {} messages", self.endpoint, request.messages.len());

    let response = self
      .client
      .post(self.endpoint.clone())
      .bearer_auth(credential)
      .json(request)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      trace!("Model error body: {body}");
      return Err(SummaristError::Upstream(format!("model service returned HTTP {status}")));
    }
    Ok(response.json().await?)
  }
}

#[async_trait]
impl LanguageModel for ChatClient {
  async fn complete(&self, system: &str, user: &str, credential: &str) -> Result<String> {
    let request =
      ChatRequest::new().with_model(&self.model).with_system(system).with_message(user);
    let response = self.send(&request, credential).await?;
    response
      .content()
      .map(str::to_string)
      .ok_or_else(|| SummaristError::Upstream("model reply had no choices".into()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_request_serialization() {
    let request = ChatRequest::new().with_model("gpt-4").with_system("sys").with_message("hello");
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["model"], "gpt-4");
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["content"], "hello");
  }

  #[test]
  fn test_validation() {
    assert!(matches!(
      ChatRequest::new().with_message("hi").validate(),
      Err(SummaristError::Config(_))
    ));
    assert!(matches!(
      ChatRequest::new().with_model("gpt-4").validate(),
      Err(SummaristError::Config(_))
    ));
    assert!(ChatRequest::new().with_model("gpt-4").with_message("hi").validate().is_ok());
  }

  #[test]
  fn test_response_content() {
    let response: ChatResponse = serde_json::from_str(
      r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Paris"}}]}"#,
    )
    .unwrap();
    assert_eq!(response.content(), Some("Paris"));

    let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
    assert_eq!(empty.content(), None);
  }

  #[tokio::test]
  async fn test_unreachable_service_is_an_error() {
    let config = ModelConfig {
      endpoint: "http://127.0.0.1:9/v1/chat/completions".into(),
      timeout_secs: 1,
      ..ModelConfig::default()
    };
    let client = ChatClient::new(&config).unwrap();
    assert!(client.complete("sys", "user", "key").await.is_err());
  }
}
