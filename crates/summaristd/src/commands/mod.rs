use summarist::{
  clients::{SearchQuery, DEFAULT_DAYS, DEFAULT_MAX_RESULTS},
  service::{DEFAULT_LIMIT, DEFAULT_SKIP},
};

use super::*;

pub mod categories;
pub mod clean;
pub mod engagement;
pub mod init;
pub mod list;
pub mod search;
pub mod summary;

pub use categories::categories;
pub use clean::clean;
pub use engagement::{bookmark, bookmarks, history, read, unbookmark};
pub use init::{init, InitOptions};
pub use list::{list, ListOptions};
pub use search::{refresh, search, SearchOptions};
pub use summary::{summary, SummaryOptions};

/// Available commands for the CLI
#[derive(clap::Subcommand, Clone)]
pub enum Commands {
  /// Create the configuration file and database
  Init(InitOptions),

  /// Removes the database after confirmation
  Clean,

  /// Show the category catalog
  Categories,

  /// Search arXiv for recent papers without storing them
  Search(SearchOptions),

  /// Search arXiv and store the results
  Refresh(SearchOptions),

  /// List stored papers, newest first
  List(ListOptions),

  /// Show a paper's summary, generating it on first request
  Summary(SummaryOptions),

  /// Bookmark a stored paper
  Bookmark {
    /// arXiv identifier, e.g. "2301.07041"
    identifier: String,
  },

  /// Remove a bookmark
  Unbookmark {
    /// arXiv identifier
    identifier: String,
  },

  /// Show a stored paper and add it to the reading history
  Read {
    /// arXiv identifier
    identifier: String,
  },

  /// List bookmarked papers
  Bookmarks(PageOptions),

  /// List recently read papers
  History(PageOptions),
}

/// Offset and page size for listings.
#[derive(Args, Clone)]
pub struct PageOptions {
  /// Number of entries to skip
  #[arg(long, default_value_t = DEFAULT_SKIP)]
  pub skip:  usize,
  /// Maximum number of entries to show
  #[arg(long, default_value_t = DEFAULT_LIMIT)]
  pub limit: usize,
}
