//! Database instructions.
//!
//! Every operation on the store is a small value implementing [`DatabaseInstruction`]. Building
//! the value is cheap and synchronous; executing it hops onto the connection thread and returns
//! the instruction's `Output`.

use rusqlite::{params, params_from_iter, OptionalExtension};

use super::*;
use crate::database::models::{
  load_paper, paper_id, summary_from_row, timestamp, to_timestamp, PaperRow, PAPER_COLUMNS,
  SUMMARY_COLUMNS,
};

pub mod add;
pub mod cache;
pub mod engagement;
pub mod query;

/// An operation against the [`Database`].
#[async_trait]
pub trait DatabaseInstruction {
  /// What executing the instruction yields.
  type Output;

  /// Runs the instruction.
  ///
  /// Takes a shared reference: the connection serializes calls itself.
  async fn execute(&self, db: &Database) -> Result<Self::Output>;
}

/// Renders `LIMIT`/`OFFSET` for optional pagination. SQLite treats a negative limit as none.
fn pagination(skip: usize, limit: Option<usize>) -> String {
  let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
  let skip = i64::try_from(skip).unwrap_or(i64::MAX);
  format!("LIMIT {limit} OFFSET {skip}")
}
