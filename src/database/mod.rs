/*!
 * Database module for the segment translation memory.
 *
 * This module provides SQLite-based persistence for:
 * - Scanned documents and their source hashes
 * - Extracted segments, replaced whenever a document changes
 * - Translations keyed by segment identifier and language
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{DocumentRecord, SegmentRecord, TranslationRecord, UpsertOutcome};
pub use repository::Repository;
