//! Module for the [`Commands::Categories`] listing.

use super::*;

/// Function for the [`Commands::Categories`] in the CLI.
pub fn categories<I: UserInteraction>(interaction: &I) -> Result<()> {
  interaction.reply(ResponseContent::Categories(Category::all()))
}
