//! Module for setting up a [`summarist`] environment

use super::*;

/// Options for [`Commands::Init`].
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Identifier recorded with bookmarks and history
  #[arg(long)]
  pub user: Option<String>,
  /// Default model API key stored in the configuration
  #[arg(long)]
  pub api_key: Option<String>,
}

/// Function for the [`Commands::Init`] in the CLI.
pub async fn init<I: UserInteraction>(
  interaction: &I,
  cli: &Cli,
  options: &InitOptions,
) -> Result<()> {
  let config_path = cli.config_path();
  if config_path.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      config_path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info(
      "Keeping the existing configuration; pass --config to create another one",
    ))?;
    return Ok(());
  }

  let mut config = Config::default();
  config.database_path = match &cli.path {
    Some(path) => path.clone(),
    None if interaction.confirm(&format!(
      "Would you like to use the default path {} for the database?",
      Database::default_path().display()
    ))? =>
      Database::default_path(),
    None => PathBuf::from(interaction.prompt("Database path", "summarist.db")?),
  };
  config.user.id = match &options.user {
    Some(user) => user.clone(),
    None => interaction.prompt("Reader identifier", &config.user.id)?,
  };
  if let Some(api_key) = &options.api_key {
    config = config.with_api_key(api_key);
  }

  config.save(&config_path)?;
  Database::open(&config.database_path).await?;
  interaction.reply(ResponseContent::Success(&format!(
    "Initialized summarist\nConfig path: {}\nDatabase path: {}",
    config_path.display(),
    config.database_path.display(),
  )))
}
