//! Module for the index-facing commands: [`Commands::Search`] and [`Commands::Refresh`].

use super::*;

/// Options shared by searches and refreshes.
#[derive(Args, Clone)]
pub struct SearchOptions {
  /// arXiv category code
  #[arg(long, default_value = summarist::category::DEFAULT_CATEGORY)]
  pub category:    String,
  /// Only entries mentioning this subtopic
  #[arg(long)]
  pub subtopic:    Option<String>,
  /// Number of results, at most 50
  #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
  pub max_results: usize,
  /// Look-back window in days, at most 30
  #[arg(long, default_value_t = DEFAULT_DAYS)]
  pub days:        u32,
}

impl SearchOptions {
  /// Builds the query, canonicalizing catalog categories.
  fn to_query<I: UserInteraction>(&self, interaction: &I) -> Result<SearchQuery> {
    let category = match Category::lookup(&self.category) {
      Some(category) => category.code.to_string(),
      None => {
        interaction.reply(ResponseContent::Warning(&format!(
          "{} is not in the category catalog, searching anyway",
          self.category
        )))?;
        self.category.trim().to_string()
      },
    };
    let query = SearchQuery::new(category, self.max_results, self.days);
    Ok(match &self.subtopic {
      Some(subtopic) => query.with_subtopic(subtopic.as_str()),
      None => query,
    })
  }
}

/// Function for the [`Commands::Search`] in the CLI.
pub async fn search<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  options: &SearchOptions,
) -> Result<()> {
  let query = options.to_query(interaction)?;
  interaction.reply(ResponseContent::Info(&format!(
    "Searching {} over the last {} days",
    query.category(),
    query.days()
  )))?;

  let views = summarist.ingestor.search(&query).await?;
  if views.is_empty() {
    interaction.reply(ResponseContent::Info("No papers found"))
  } else {
    interaction.reply(ResponseContent::Views(&views))
  }
}

/// Function for the [`Commands::Refresh`] in the CLI.
pub async fn refresh<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  options: &SearchOptions,
) -> Result<()> {
  let query = options.to_query(interaction)?;
  let papers = summarist.ingestor.refresh(&query).await?;
  interaction.reply(ResponseContent::Success(&format!(
    "Stored {} papers from {}",
    papers.len(),
    query.category()
  )))?;
  if !papers.is_empty() {
    interaction.reply(ResponseContent::Papers(&papers))?;
  }
  Ok(())
}
