//! Prompts and styled output.

use dialoguer::{Confirm, Input};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Prefix for list items
pub static ITEM_PREFIX: &str = "├─";
/// Prefix for the last item of a list
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Continuation line under a list item
pub static CONTINUE_PREFIX: &str = "│  ";

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Full details of one paper
  Paper(&'a Paper),
  /// A list of stored papers
  Papers(&'a [Paper]),
  /// Search results straight from the index
  Views(&'a [PaperView]),
  /// A four-field summary
  Summary(&'a Summary),
  /// Bookmarks or history entries
  Activity(&'a [ActivityEntry]),
  /// The category catalog
  Categories(&'a [Category]),
  /// Something worked
  Success(&'a str),
  /// Neutral information
  Info(&'a str),
  /// Something worth noticing
  Warning(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Asks for text, offering `default`.
  fn prompt(&self, message: &str, default: &str) -> Result<String>;
  /// Shows `content`.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// The interactive terminal.
pub struct Terminal {
  /// Answer every prompt with its default
  accept_defaults: bool,
}

impl Terminal {
  /// Creates a terminal; with `accept_defaults` nothing is ever asked.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).yellow()))
        .default(false)
        .wait_for_newline(true)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str, default: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(default.to_string());
    }
    Ok(
      Input::<String>::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).yellow()))
        .default(default.to_string())
        .interact_text()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Paper(paper) => print_paper(paper),
      ResponseContent::Papers(papers) => {
        println!("{} Found {} papers", style(INFO_PREFIX).cyan(), papers.len());
        for (i, paper) in papers.iter().enumerate() {
          let prefix = if i + 1 == papers.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          println!("{} {}", style(prefix).dim(), style(&paper.title).white().bold());
          println!(
            "{}   {} · {} · {}",
            style(CONTINUE_PREFIX).dim(),
            style(&paper.arxiv_id).yellow(),
            style(&paper.category).cyan(),
            paper.published.format("%Y-%m-%d")
          );
        }
      },
      ResponseContent::Views(views) => {
        println!("{} Found {} papers", style(INFO_PREFIX).cyan(), views.len());
        for (i, view) in views.iter().enumerate() {
          let prefix = if i + 1 == views.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          println!("{} {}", style(prefix).dim(), style(&view.title).white().bold());
          println!(
            "{}   {} · {}",
            style(CONTINUE_PREFIX).dim(),
            view.authors.join(", "),
            view.published.format("%Y-%m-%d")
          );
          println!("{}   {}", style(CONTINUE_PREFIX).dim(), style(&view.url).blue().underlined());
          if let Some(summary) = &view.summary {
            println!("{}   {}", style(CONTINUE_PREFIX).dim(), summary.main_idea);
          }
        }
      },
      ResponseContent::Summary(summary) => {
        for (label, text) in [
          (summarist::summary::OBSERVATION_LABEL, &summary.observation),
          (summarist::summary::OBJECTIVE_LABEL, &summary.objective),
          (summarist::summary::CHALLENGE_LABEL, &summary.challenge),
          (summarist::summary::MAIN_IDEA_LABEL, &summary.main_idea),
        ] {
          println!("   {} {}", style(format!("{label}:")).green().bold(), text);
        }
      },
      ResponseContent::Activity(entries) => {
        for (i, entry) in entries.iter().enumerate() {
          let prefix = if i + 1 == entries.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          println!("{} {}", style(prefix).dim(), style(&entry.paper.title).white().bold());
          println!(
            "{}   {} · {}",
            style(CONTINUE_PREFIX).dim(),
            style(&entry.paper.arxiv_id).yellow(),
            entry.at.format("%Y-%m-%d %H:%M")
          );
        }
      },
      ResponseContent::Categories(categories) =>
        for category in categories {
          println!("   {} {}", style(category.code).yellow().bold(), category.name);
        },
      ResponseContent::Success(message) => println!("{} {message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(message) => println!("{} {message}", style(INFO_PREFIX).cyan()),
      ResponseContent::Warning(message) => println!("{} {message}", style(WARNING_PREFIX).yellow()),
    }
    Ok(())
  }
}

/// Prints every stored field of a paper.
fn print_paper(paper: &Paper) {
  println!("\n{} Paper details:", style(SUCCESS_PREFIX).green());
  println!("   {} {}", style("Title:").green().bold(), style(&paper.title).white());
  println!("   {} {}", style("Authors:").green().bold(), style(paper.author_names()).white());
  println!("   {} {}", style("Category:").green().bold(), style(&paper.category).white());
  println!(
    "   {} {}",
    style("Published:").green().bold(),
    style(paper.published.format("%Y-%m-%d")).white()
  );
  println!("   {} {}", style("Abstract:").green().bold(), style(&paper.abstract_text).white());
  println!("   {} {}", style("URL:").green().bold(), style(&paper.url).blue().underlined());
  if let Some(url) = &paper.pdf_url {
    println!("   {} {}", style("PDF URL:").green().bold(), style(url).blue().underlined());
  }
}
