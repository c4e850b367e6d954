//! Module for abstracting the "clean" functionality to the [`summarist`] database.

use super::*;

/// Function for the [`Commands::Clean`] in the CLI.
pub fn clean<I: UserInteraction>(interaction: &I, cli: &Cli) -> Result<()> {
  let path = match &cli.path {
    Some(path) => path.clone(),
    None => {
      let path = cli.load_config()?.database_path;
      interaction.reply(ResponseContent::Info(&format!(
        "Using configured database path: {}",
        path.display()
      )))?;
      path
    },
  };

  if !path.exists() {
    interaction
      .reply(ResponseContent::Warning(&format!("No database found at: {}", path.display())))?;
    return Ok(());
  }

  interaction.reply(ResponseContent::Warning(&format!("Database found at: {}", path.display())))?;
  if !interaction.confirm("Are you sure you want to delete this database?")? {
    interaction.reply(ResponseContent::Info("Operation cancelled"))?;
    return Ok(());
  }
  // Typed confirmation
  if interaction.prompt("Type DELETE to confirm deletion", "DELETE")? != "DELETE" {
    interaction.reply(ResponseContent::Info("Operation cancelled"))?;
    return Ok(());
  }

  std::fs::remove_file(&path)?;
  // SQLite side files: -wal, -shm, -journal
  for file in glob::glob(&format!("{}-*", glob::Pattern::escape(&path.display().to_string())))?
    .flatten()
  {
    trace!("Removing {}", file.display());
    std::fs::remove_file(file)?;
  }
  interaction.reply(ResponseContent::Success("Database files cleaned"))
}
