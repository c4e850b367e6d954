//! Module for the [`Commands::List`] listing of stored papers.

use super::*;

/// Options for [`Commands::List`].
#[derive(Args, Clone)]
pub struct ListOptions {
  /// Only this category; the reader's preferences apply when neither filter is given
  #[arg(long)]
  pub category: Option<String>,
  /// Only papers stored for this subtopic
  #[arg(long)]
  pub subtopic: Option<String>,
  /// Pagination
  #[command(flatten)]
  pub page:     PageOptions,
}

/// Function for the [`Commands::List`] in the CLI.
pub async fn list<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  user: &User,
  options: &ListOptions,
) -> Result<()> {
  let papers = summarist
    .library
    .list_papers(
      user,
      options.category.as_deref(),
      options.subtopic.as_deref(),
      options.page.skip,
      options.page.limit,
    )
    .await?;

  if papers.is_empty() {
    interaction.reply(ResponseContent::Info("No stored papers match; try `summarist refresh`"))
  } else {
    interaction.reply(ResponseContent::Papers(&papers))
  }
}
