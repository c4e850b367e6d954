//! Module for the [`Commands::Summary`] command.

use super::*;

/// Options for [`Commands::Summary`].
#[derive(Args, Clone)]
pub struct SummaryOptions {
  /// arXiv identifier, e.g. "2301.07041"
  pub identifier: String,
  /// Model API key; falls back to the configuration and environment
  #[arg(long, env = "SUMMARIST_API_KEY", hide_env_values = true)]
  pub api_key:    Option<String>,
  /// Fetch the paper from arXiv when it is not stored
  #[arg(long)]
  pub fetch:      bool,
}

/// Function for the [`Commands::Summary`] in the CLI.
pub async fn summary<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  user: &User,
  options: &SummaryOptions,
) -> Result<()> {
  let api_key = options.api_key.as_deref();
  let summary = if options.fetch {
    summarist.summaries.generated_summary(&options.identifier, api_key).await?
  } else {
    summarist.summaries.get_summary(&options.identifier, user, api_key).await?
  };
  let paper = summarist.library.get_paper(&options.identifier).await?;

  interaction.reply(ResponseContent::Info(&paper.title))?;
  interaction.reply(ResponseContent::Summary(&summary))
}
