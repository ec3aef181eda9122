//! SQLite-backed document store.
//!
//! Each language collection is a `docs_<lang>` table with the document
//! JSON in a `body` column and the ordered `_id` as primary key, so
//! anchor-bounded page scans ride the primary-key index. The store
//! guarantees a stable id-ascending order across paginated reads of a
//! static collection; no snapshot isolation is assumed if a collection
//! mutates between fetches.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::{connect, Result, StoreError};
use crate::models::Document;
use crate::pager::{Direction, PageRequest};
use crate::search::LmFilter;

/// Collection table prefix; the language code is the suffix.
const COLLECTION_PREFIX: &str = "docs_";

/// One import-log row.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub lang: String,
    pub file: String,
    pub doc_count: u64,
    pub imported_at: DateTime<Utc>,
}

/// SQLite-backed document repository.
pub struct DocumentRepository {
    db_path: PathBuf,
}

impl DocumentRepository {
    /// Open the repository, creating the database and bookkeeping
    /// tables if needed.
    pub fn new(db_path: &Path) -> Result<Self> {
        let repo = Self {
            db_path: db_path.to_path_buf(),
        };
        repo.init_schema()?;
        Ok(repo)
    }

    fn connect(&self) -> Result<Connection> {
        connect(&self.db_path)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS import_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                lang TEXT NOT NULL,
                file TEXT NOT NULL,
                doc_count INTEGER NOT NULL,
                imported_at TEXT NOT NULL
            );
        "#,
        )?;
        Ok(())
    }

    /// Create the collection table for a language if it does not exist.
    pub fn init_collection(&self, lang: &str) -> Result<()> {
        let table = collection_table(lang)?;
        let conn = self.connect()?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );"
        ))?;
        debug!(lang, "collection ready");
        Ok(())
    }

    /// Insert or replace a batch of documents in one transaction.
    /// Returns the number of documents written.
    pub fn save_all(&self, lang: &str, docs: &[Document]) -> Result<u64> {
        let table = collection_table(lang)?;
        self.init_collection(lang)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR REPLACE INTO {table} (id, body) VALUES (?1, ?2)"
            ))?;
            for doc in docs {
                let body = serde_json::to_string(doc).map_err(|source| StoreError::Decode {
                    id: doc.id.clone(),
                    source,
                })?;
                stmt.execute(params![doc.id, body])?;
            }
        }
        tx.commit()?;
        Ok(docs.len() as u64)
    }

    /// Fetch a single document by id.
    pub fn get(&self, lang: &str, id: &str) -> Result<Option<Document>> {
        let table = self.existing_table(lang)?;
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT body FROM {table} WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => {
                let body: String = row.get(0)?;
                Ok(Some(decode(id, &body)?))
            }
            None => Ok(None),
        }
    }

    /// Fetch one page: up to `batch_size` documents matching `filter`,
    /// id-bounded by the request's anchor, ordered by id ascending.
    ///
    /// Filtering happens document-by-document while scanning in id
    /// order from the anchor bound, so the page holds the first
    /// `batch_size` matches past the anchor regardless of how sparse
    /// the matches are.
    pub fn find_page(
        &self,
        lang: &str,
        filter: &LmFilter,
        request: &PageRequest,
    ) -> Result<Vec<Document>> {
        let table = self.existing_table(lang)?;
        let conn = self.connect()?;

        let sql = match (&request.anchor, request.direction) {
            (Some(_), Direction::Forward) => {
                format!("SELECT id, body FROM {table} WHERE id >= ?1 ORDER BY id ASC")
            }
            (Some(_), Direction::Backward) => {
                format!("SELECT id, body FROM {table} WHERE id <= ?1 ORDER BY id ASC")
            }
            (None, _) => format!("SELECT id, body FROM {table} ORDER BY id ASC"),
        };

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = match &request.anchor {
            Some(anchor) => stmt.query(params![anchor])?,
            None => stmt.query([])?,
        };

        let mut docs = Vec::with_capacity(request.batch_size);
        while let Some(row) = rows.next()? {
            if docs.len() >= request.batch_size {
                break;
            }
            let id: String = row.get(0)?;
            let body: String = row.get(1)?;
            let doc = decode(&id, &body)?;
            if filter.matches_doc(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    /// Enumerate available language collections from the catalog.
    pub fn languages(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name LIKE 'docs\\_%' ESCAPE '\\'
             ORDER BY name",
        )?;
        let langs = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|name| {
                name.map(|n| n.strip_prefix(COLLECTION_PREFIX).map(str::to_string))
                    .transpose()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(langs)
    }

    /// Number of documents in a language collection.
    pub fn doc_count(&self, lang: &str) -> Result<u64> {
        let table = self.existing_table(lang)?;
        let conn = self.connect()?;
        let count: u64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    /// Record one completed import.
    pub fn record_import(&self, lang: &str, file: &str, doc_count: u64) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO import_log (lang, file, doc_count, imported_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![lang, file, doc_count, Utc::now().to_rfc3339()],
        )?;
        info!(lang, file, doc_count, "import recorded");
        Ok(())
    }

    /// Import history, newest first.
    pub fn import_history(&self) -> Result<Vec<ImportRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT lang, file, doc_count, imported_at FROM import_log ORDER BY id DESC",
        )?;
        let records = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records
            .into_iter()
            .map(|(lang, file, doc_count, imported_at)| ImportRecord {
                lang,
                file,
                doc_count,
                imported_at: DateTime::parse_from_rfc3339(&imported_at)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or(DateTime::UNIX_EPOCH),
            })
            .collect())
    }

    /// Resolve a language to its collection table, failing when the
    /// collection does not exist.
    fn existing_table(&self, lang: &str) -> Result<String> {
        let table = collection_table(lang)?;
        let conn = self.connect()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![table],
            |row| row.get(0),
        )?;
        if exists {
            Ok(table)
        } else {
            Err(StoreError::UnknownLanguage(lang.to_string()))
        }
    }
}

/// Validate a language code and produce its table name. Codes are
/// spliced into SQL identifiers, so anything beyond lowercase
/// alphanumerics and underscores is rejected.
fn collection_table(lang: &str) -> Result<String> {
    let valid = !lang.is_empty()
        && lang.starts_with(|c: char| c.is_ascii_lowercase())
        && lang
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(format!("{COLLECTION_PREFIX}{lang}"))
    } else {
        Err(StoreError::InvalidLanguage(lang.to_string()))
    }
}

fn decode(id: &str, body: &str) -> Result<Document> {
    serde_json::from_str(body).map_err(|source| StoreError::Decode {
        id: id.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchCriteria;
    use tempfile::tempdir;

    fn test_repo() -> (DocumentRepository, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let repo = DocumentRepository::new(&dir.path().join("test.db")).unwrap();
        (repo, dir)
    }

    fn doc(id: &str, text: &str) -> Document {
        serde_json::from_value(serde_json::json!({ "_id": id, "text": text })).unwrap()
    }

    fn doc_with_lemma(id: &str, lemma: &str, score: f64) -> Document {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "text": "sentence text",
            "lms": [{
                "score": score,
                "source": {"start": 0, "end": 4, "form": lemma, "lemma": lemma},
                "target": {"start": 5, "end": 9, "form": "tgt", "lemma": "tgt"}
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_save_and_get_roundtrip() {
        let (repo, _dir) = test_repo();
        repo.save_all("en", &[doc("d1", "hello world")]).unwrap();
        let loaded = repo.get("en", "d1").unwrap().unwrap();
        assert_eq!(loaded.text, "hello world");
        assert!(repo.get("en", "missing").unwrap().is_none());
    }

    #[test]
    fn test_find_page_orders_by_id_and_respects_batch() {
        let (repo, _dir) = test_repo();
        // Inserted out of order on purpose.
        repo.save_all("en", &[doc("c", ""), doc("a", ""), doc("b", ""), doc("d", "")])
            .unwrap();

        let filter = LmFilter::build(&SearchCriteria::new());
        let page = repo
            .find_page("en", &filter, &PageRequest::start(3))
            .unwrap();
        let ids: Vec<&str> = page.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_find_page_forward_anchor_is_inclusive() {
        let (repo, _dir) = test_repo();
        repo.save_all("en", &[doc("a", ""), doc("b", ""), doc("c", "")])
            .unwrap();

        let filter = LmFilter::build(&SearchCriteria::new());
        let page = repo
            .find_page(
                "en",
                &filter,
                &PageRequest::at("b", Direction::Forward, 10),
            )
            .unwrap();
        let ids: Vec<&str> = page.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_find_page_backward_bounds_from_collection_start() {
        let (repo, _dir) = test_repo();
        repo.save_all("en", &[doc("a", ""), doc("b", ""), doc("c", "")])
            .unwrap();

        let filter = LmFilter::build(&SearchCriteria::new());
        let page = repo
            .find_page(
                "en",
                &filter,
                &PageRequest::at("b", Direction::Backward, 10),
            )
            .unwrap();
        let ids: Vec<&str> = page.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_find_page_applies_filter_while_scanning() {
        let (repo, _dir) = test_repo();
        repo.save_all(
            "en",
            &[
                doc_with_lemma("a", "fire", 0.9),
                doc_with_lemma("b", "water", 0.9),
                doc_with_lemma("c", "fireplace", 0.9),
                doc_with_lemma("d", "fired", 0.9),
            ],
        )
        .unwrap();

        let criteria: SearchCriteria = [("source_lemma", "fire")].into_iter().collect();
        let filter = LmFilter::build(&criteria);
        let page = repo
            .find_page("en", &filter, &PageRequest::start(2))
            .unwrap();
        let ids: Vec<&str> = page.iter().map(|d| d.id.as_str()).collect();
        // First two matches in id order; "b" is skipped, "d" overflows
        // the batch.
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_languages_enumerates_collections() {
        let (repo, _dir) = test_repo();
        repo.init_collection("en").unwrap();
        repo.init_collection("fa").unwrap();
        repo.init_collection("es").unwrap();
        assert_eq!(repo.languages().unwrap(), vec!["en", "es", "fa"]);
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let (repo, _dir) = test_repo();
        let filter = LmFilter::build(&SearchCriteria::new());
        let err = repo
            .find_page("xx", &filter, &PageRequest::start(5))
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownLanguage(_)));
    }

    #[test]
    fn test_invalid_language_code_rejected() {
        let (repo, _dir) = test_repo();
        let err = repo.init_collection("en; DROP TABLE docs_en").unwrap_err();
        assert!(matches!(err, StoreError::InvalidLanguage(_)));
        assert!(collection_table("EN").is_err());
        assert!(collection_table("").is_err());
        assert_eq!(collection_table("pt_br").unwrap(), "docs_pt_br");
    }

    #[test]
    fn test_doc_count_and_import_log() {
        let (repo, _dir) = test_repo();
        repo.save_all("en", &[doc("a", ""), doc("b", "")]).unwrap();
        assert_eq!(repo.doc_count("en").unwrap(), 2);

        repo.record_import("en", "batch1.jsonl", 2).unwrap();
        let history = repo.import_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].file, "batch1.jsonl");
        assert_eq!(history[0].doc_count, 2);
    }
}
