/*!
 * Database entity models.
 *
 * These structures map directly to the translation-memory tables and
 * convert to and from the extraction data model.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extraction::{BlockType, PlaceholderRecord, Segment, SegmentMetadata};

/// Result of storing a scanned document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// Source hash matched, rows left untouched
    Unchanged,
    /// Document was not known before
    Inserted,
    /// Segment rows were replaced
    Updated,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Unchanged => write!(f, "unchanged"),
            UpsertOutcome::Inserted => write!(f, "inserted"),
            UpsertOutcome::Updated => write!(f, "updated"),
        }
    }
}

impl std::str::FromStr for UpsertOutcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unchanged" => Ok(UpsertOutcome::Unchanged),
            "inserted" => Ok(UpsertOutcome::Inserted),
            "updated" => Ok(UpsertOutcome::Updated),
            _ => Err(anyhow::anyhow!("Invalid upsert outcome: {}", s)),
        }
    }
}

/// Row of the `documents` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub file_path: String,
    pub source_hash: String,
    pub segment_count: i64,
    pub updated_at: String,
}

/// Row of the `segments` table
///
/// Placeholders and metadata are kept as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub identifier: String,
    pub file_path: String,
    pub ord: i64,
    pub start_line: i64,
    pub block_type: String,
    pub msgid: String,
    pub context_path: String,
    pub placeholders_json: String,
    pub metadata_json: String,
}

impl SegmentRecord {
    /// Build a row from an extracted segment
    pub fn from_segment(segment: &Segment) -> Result<Self> {
        Ok(Self {
            identifier: segment.identifier.clone(),
            file_path: segment.file_path.clone(),
            ord: segment.order as i64,
            start_line: segment.start_line as i64,
            block_type: segment.block_type.to_string(),
            msgid: segment.msgid.clone(),
            context_path: segment.context_path.clone(),
            placeholders_json: serde_json::to_string(&segment.placeholders)
                .context("Failed to serialize placeholders")?,
            metadata_json: serde_json::to_string(&segment.metadata)
                .context("Failed to serialize segment metadata")?,
        })
    }

    /// Rebuild the extracted segment from a stored row
    pub fn into_segment(self) -> Result<Segment> {
        let block_type: BlockType = self.block_type.parse()?;
        let placeholders: Vec<PlaceholderRecord> = serde_json::from_str(&self.placeholders_json)
            .with_context(|| format!("Corrupt placeholders for {}", self.identifier))?;
        let metadata: SegmentMetadata = serde_json::from_str(&self.metadata_json)
            .with_context(|| format!("Corrupt metadata for {}", self.identifier))?;

        Ok(Segment {
            identifier: self.identifier,
            file_path: self.file_path,
            start_line: self.start_line as usize,
            block_type,
            msgid: self.msgid,
            placeholders,
            context_path: self.context_path,
            order: self.ord as usize,
            metadata,
        })
    }
}

/// Row of the `translations` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub identifier: String,
    pub language: String,
    pub msgstr: String,
    pub updated_at: String,
}
