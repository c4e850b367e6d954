//! Row representations and their conversions to domain types.

#![allow(clippy::missing_docs_in_private_items)]

use chrono::SecondsFormat;
use rusqlite::{types::Type, OptionalExtension, Row};

use super::*;

/// Column list matching [`PaperRow::from_row`].
pub(crate) const PAPER_COLUMNS: &str =
  "p.id, p.arxiv_id, p.title, p.abstract_text, p.category, p.published, p.url, p.pdf_url";

/// Column list matching [`summary_from_row`].
pub(crate) const SUMMARY_COLUMNS: &str =
  "s.observation, s.objective, s.challenge, s.main_idea, s.generated_at";

/// Stores timestamps as fixed-width RFC 3339 so that text order is time order.
pub(crate) fn to_timestamp(time: &DateTime<Utc>) -> String {
  time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Reads a timestamp written by [`to_timestamp`] from column `idx`.
pub(crate) fn timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
  let text: String = row.get(idx)?;
  DateTime::parse_from_rfc3339(&text)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// A paper row, without authors.
#[derive(Debug)]
pub(crate) struct PaperRow {
  pub id:            i64,
  pub arxiv_id:      String,
  pub title:         String,
  pub abstract_text: String,
  pub category:      String,
  pub published:     DateTime<Utc>,
  pub url:           String,
  pub pdf_url:       Option<String>,
}

impl PaperRow {
  /// Reads the columns of [`PAPER_COLUMNS`] starting at index 0.
  pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      arxiv_id:      row.get(1)?,
      title:         row.get(2)?,
      abstract_text: row.get(3)?,
      category:      row.get(4)?,
      published:     timestamp(row, 5)?,
      url:           row.get(6)?,
      pdf_url:       row.get(7)?,
    })
  }

  /// Attaches the paper's authors.
  pub fn into_paper(self, conn: &rusqlite::Connection) -> rusqlite::Result<Paper> {
    let mut stmt =
      conn.prepare_cached("SELECT name FROM authors WHERE paper_id = ?1 ORDER BY position")?;
    let authors = stmt
      .query_map([self.id], |row| Ok(Author { name: row.get(0)? }))?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Paper {
      arxiv_id: self.arxiv_id,
      title: self.title,
      authors,
      abstract_text: self.abstract_text,
      category: self.category,
      published: self.published,
      url: self.url,
      pdf_url: self.pdf_url,
    })
  }
}

/// Reads the columns of [`SUMMARY_COLUMNS`] starting at index 0.
pub(crate) fn summary_from_row(row: &Row) -> rusqlite::Result<Summary> {
  Ok(Summary {
    observation:  row.get(0)?,
    objective:    row.get(1)?,
    challenge:    row.get(2)?,
    main_idea:    row.get(3)?,
    generated_at: timestamp(row, 4)?,
  })
}

/// Internal id of the paper with `arxiv_id`, if stored.
pub(crate) fn paper_id(
  conn: &rusqlite::Connection,
  arxiv_id: &str,
) -> rusqlite::Result<Option<i64>> {
  conn
    .prepare_cached("SELECT id FROM papers WHERE arxiv_id = ?1")?
    .query_row([arxiv_id], |row| row.get(0))
    .optional()
}

/// Loads a complete paper by internal id.
pub(crate) fn load_paper(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Paper> {
  let sql = format!("SELECT {PAPER_COLUMNS} FROM papers p WHERE p.id = ?1");
  let row = conn.prepare_cached(&sql)?.query_row([id], PaperRow::from_row)?;
  row.into_paper(conn)
}
