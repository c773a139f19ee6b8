/*!
 * Repository layer for the translation-memory store.
 *
 * This module provides a high-level API over the documents, segments and
 * translations tables, abstracting away the SQL details.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{DocumentRecord, SegmentRecord, TranslationRecord, UpsertOutcome};
use crate::extraction::{DocumentSegments, Segment};

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Store a scanned document and its segments
    ///
    /// Nothing is written when the stored source hash matches. Otherwise the
    /// document's segment rows are replaced in a single transaction.
    pub async fn upsert_document(&self, document: &DocumentSegments) -> Result<UpsertOutcome> {
        let file_path = document.file_path.clone();
        let source_hash = document.source_hash.clone();
        let rows = document
            .segments
            .iter()
            .map(SegmentRecord::from_segment)
            .collect::<Result<Vec<_>>>()?;

        self.db
            .transaction_async(move |tx| {
                let existing = Self::get_document_sync(tx, &file_path)?;

                let outcome = match existing {
                    Some(ref record) if record.source_hash == source_hash => {
                        debug!("Document unchanged: {}", file_path);
                        return Ok(UpsertOutcome::Unchanged);
                    }
                    Some(_) => UpsertOutcome::Updated,
                    None => UpsertOutcome::Inserted,
                };

                let now = chrono::Utc::now().to_rfc3339();
                tx.execute(
                    r#"
                    INSERT INTO documents (file_path, source_hash, segment_count, updated_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(file_path) DO UPDATE SET
                        source_hash = excluded.source_hash,
                        segment_count = excluded.segment_count,
                        updated_at = excluded.updated_at
                    "#,
                    params![file_path, source_hash, rows.len() as i64, now],
                )?;

                tx.execute("DELETE FROM segments WHERE file_path = ?1", [&file_path])?;

                {
                    let mut stmt = tx.prepare(
                        r#"
                        INSERT INTO segments (
                            identifier, file_path, ord, start_line, block_type, msgid,
                            context_path, placeholders_json, metadata_json
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                        "#,
                    )?;

                    for row in &rows {
                        stmt.execute(params![
                            row.identifier,
                            row.file_path,
                            row.ord,
                            row.start_line,
                            row.block_type,
                            row.msgid,
                            row.context_path,
                            row.placeholders_json,
                            row.metadata_json,
                        ])?;
                    }
                }

                debug!("Stored {} segments for {} ({})", rows.len(), file_path, outcome);
                Ok(outcome)
            })
            .await
    }

    /// Get a stored document by path
    pub async fn get_document(&self, file_path: &str) -> Result<Option<DocumentRecord>> {
        let file_path = file_path.to_string();

        self.db
            .execute_async(move |conn| Self::get_document_sync(conn, &file_path))
            .await
    }

    /// Get a document by path (synchronous version for use within transactions)
    fn get_document_sync(conn: &Connection, file_path: &str) -> Result<Option<DocumentRecord>> {
        let result = conn
            .query_row(
                "SELECT file_path, source_hash, segment_count, updated_at FROM documents WHERE file_path = ?1",
                [file_path],
                |row| {
                    Ok(DocumentRecord {
                        file_path: row.get(0)?,
                        source_hash: row.get(1)?,
                        segment_count: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(result)
    }

    /// List all stored documents ordered by path
    pub async fn list_documents(&self) -> Result<Vec<DocumentRecord>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT file_path, source_hash, segment_count, updated_at FROM documents ORDER BY file_path",
                )?;

                let documents = stmt
                    .query_map([], |row| {
                        Ok(DocumentRecord {
                            file_path: row.get(0)?,
                            source_hash: row.get(1)?,
                            segment_count: row.get(2)?,
                            updated_at: row.get(3)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(documents)
            })
            .await
    }

    /// Delete stored documents whose path is not in `keep`
    ///
    /// Segments go with them through the foreign key cascade. Returns the
    /// number of documents removed.
    pub async fn remove_missing_documents(&self, keep: &[String]) -> Result<usize> {
        let keep: Vec<String> = keep.to_vec();

        self.db
            .transaction_async(move |tx| {
                let stored: Vec<String> = {
                    let mut stmt = tx.prepare("SELECT file_path FROM documents")?;
                    stmt.query_map([], |row| row.get(0))?
                        .collect::<Result<Vec<_>, _>>()?
                };

                let mut removed = 0;
                for file_path in stored.iter().filter(|path| !keep.contains(path)) {
                    removed += tx.execute("DELETE FROM documents WHERE file_path = ?1", [file_path])?;
                    debug!("Removed vanished document: {}", file_path);
                }

                Ok(removed)
            })
            .await
    }

    // =========================================================================
    // Segment Operations
    // =========================================================================

    /// Get a document's segments in document order
    pub async fn get_segments(&self, file_path: &str) -> Result<Vec<Segment>> {
        let file_path = file_path.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT identifier, file_path, ord, start_line, block_type, msgid,
                           context_path, placeholders_json, metadata_json
                    FROM segments WHERE file_path = ?1 ORDER BY ord
                    "#,
                )?;

                let rows = stmt
                    .query_map([&file_path], |row| {
                        Ok(SegmentRecord {
                            identifier: row.get(0)?,
                            file_path: row.get(1)?,
                            ord: row.get(2)?,
                            start_line: row.get(3)?,
                            block_type: row.get(4)?,
                            msgid: row.get(5)?,
                            context_path: row.get(6)?,
                            placeholders_json: row.get(7)?,
                            metadata_json: row.get(8)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                rows.into_iter().map(SegmentRecord::into_segment).collect()
            })
            .await
    }

    /// Total number of stored segments
    pub async fn count_segments(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM segments", [], |row| row.get(0))?)
            })
            .await
    }

    // =========================================================================
    // Translation Operations
    // =========================================================================

    /// Save or replace the translation of a segment
    pub async fn save_translation(&self, identifier: &str, language: &str, msgstr: &str) -> Result<()> {
        let identifier = identifier.to_string();
        let language = language.to_string();
        let msgstr = msgstr.to_string();

        self.db
            .execute_async(move |conn| {
                let now = chrono::Utc::now().to_rfc3339();
                conn.execute(
                    r#"
                    INSERT INTO translations (identifier, language, msgstr, updated_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(identifier, language) DO UPDATE SET
                        msgstr = excluded.msgstr,
                        updated_at = excluded.updated_at
                    "#,
                    params![identifier, language, msgstr, now],
                )?;
                Ok(())
            })
            .await
    }

    /// Get the translation of a segment
    pub async fn get_translation(&self, identifier: &str, language: &str) -> Result<Option<TranslationRecord>> {
        let identifier = identifier.to_string();
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        r#"
                        SELECT identifier, language, msgstr, updated_at
                        FROM translations WHERE identifier = ?1 AND language = ?2
                        "#,
                        params![identifier, language],
                        |row| {
                            Ok(TranslationRecord {
                                identifier: row.get(0)?,
                                language: row.get(1)?,
                                msgstr: row.get(2)?,
                                updated_at: row.get(3)?,
                            })
                        },
                    )
                    .optional()?;

                Ok(result)
            })
            .await
    }
}
