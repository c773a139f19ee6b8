/*!
 * JSON export of extracted segments.
 */

use anyhow::{Context, Result};

use crate::extraction::DocumentSegments;

/// Pretty-printed JSON array of documents and their segments
pub fn to_json(documents: &[DocumentSegments]) -> Result<String> {
    serde_json::to_string_pretty(documents).context("Failed to serialize segments to JSON")
}

/// Parse a previous JSON export back into documents
pub fn from_json(content: &str) -> Result<Vec<DocumentSegments>> {
    serde_json::from_str(content).context("Failed to parse segments JSON")
}
