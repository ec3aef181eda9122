//! Repository layer for document persistence.
//!
//! Per-language document collections live in one SQLite database, each
//! as a `docs_<lang>` table holding document JSON keyed by ordered id.

mod document;

pub use document::{DocumentRepository, ImportRecord};

use std::path::Path;

use rusqlite::Connection;

/// Repository result type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid document body for '{id}': {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid language code '{0}'")]
    InvalidLanguage(String),

    #[error("no collection for language '{0}'")]
    UnknownLanguage(String),
}

/// Open a connection with the pragmas the viewer relies on.
pub(crate) fn connect(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;
    Ok(conn)
}
