/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for the translation-memory tables
 * and records the schema version they were created with.
 */

use anyhow::{Context, Result};
use rusqlite::Connection;
use log::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Foreign keys are per-connection in SQLite
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // One row per scanned document
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            file_path TEXT PRIMARY KEY,
            source_hash TEXT NOT NULL,
            segment_count INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS segments (
            identifier TEXT PRIMARY KEY,
            file_path TEXT NOT NULL REFERENCES documents(file_path) ON DELETE CASCADE,
            ord INTEGER NOT NULL,
            start_line INTEGER NOT NULL,
            block_type TEXT NOT NULL,
            msgid TEXT NOT NULL,
            context_path TEXT NOT NULL,
            placeholders_json TEXT NOT NULL,
            metadata_json TEXT NOT NULL,
            UNIQUE(file_path, ord)
        );

        CREATE INDEX IF NOT EXISTS idx_segments_file ON segments(file_path);
        CREATE INDEX IF NOT EXISTS idx_segments_msgid ON segments(msgid);
        "#,
    )?;

    // Translations outlive segment rewrites: keyed by identifier only
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            identifier TEXT NOT NULL,
            language TEXT NOT NULL,
            msgstr TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (identifier, language)
        );

        CREATE INDEX IF NOT EXISTS idx_translations_language ON translations(language);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}
