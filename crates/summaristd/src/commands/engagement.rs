//! Module for bookmarks and reading history.

use super::*;

/// Function for the [`Commands::Bookmark`] in the CLI.
pub async fn bookmark<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  user: &User,
  identifier: &str,
) -> Result<()> {
  if summarist.engagement.bookmark(user, identifier).await? {
    interaction.reply(ResponseContent::Success(&format!("Bookmarked {identifier}")))
  } else {
    interaction.reply(ResponseContent::Info(&format!("{identifier} is already bookmarked")))
  }
}

/// Function for the [`Commands::Unbookmark`] in the CLI.
pub async fn unbookmark<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  user: &User,
  identifier: &str,
) -> Result<()> {
  if summarist.engagement.remove_bookmark(user, identifier).await? {
    interaction.reply(ResponseContent::Success(&format!("Removed bookmark {identifier}")))
  } else {
    interaction.reply(ResponseContent::Info(&format!("{identifier} was not bookmarked")))
  }
}

/// Function for the [`Commands::Read`] in the CLI.
pub async fn read<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  user: &User,
  identifier: &str,
) -> Result<()> {
  let paper = summarist.library.get_paper(identifier).await?;
  summarist.engagement.record_read(user, &paper.arxiv_id).await?;
  interaction.reply(ResponseContent::Paper(&paper))
}

/// Function for the [`Commands::Bookmarks`] in the CLI.
pub async fn bookmarks<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  user: &User,
  page: &PageOptions,
) -> Result<()> {
  let entries = summarist.engagement.list_bookmarks(user, page.skip, page.limit).await?;
  if entries.is_empty() {
    interaction.reply(ResponseContent::Info("No bookmarks"))
  } else {
    interaction.reply(ResponseContent::Activity(&entries))
  }
}

/// Function for the [`Commands::History`] in the CLI.
pub async fn history<I: UserInteraction>(
  interaction: &I,
  summarist: &Summarist,
  user: &User,
  page: &PageOptions,
) -> Result<()> {
  let entries = summarist.engagement.list_history(user, page.skip, page.limit).await?;
  if entries.is_empty() {
    interaction.reply(ResponseContent::Info("Nothing read yet"))
  } else {
    interaction.reply(ResponseContent::Activity(&entries))
  }
}
