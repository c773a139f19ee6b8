/*!
 * Segment model produced by the block scanner.
 *
 * Segments are created once per document scan and are never mutated after
 * they are emitted. They serialize to JSON as-is, which is what the
 * exporters and the translation-memory store consume.
 */

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::placeholders::{self, PlaceholderRecord};
use crate::errors::ExtractError;
use crate::validation::TokenValidator;

/// Structural kind of a translatable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Heading,
    Paragraph,
    ListItem,
    Blockquote,
}

impl BlockType {
    /// Identifier suffix used for numbered blocks
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::ListItem => "li",
            Self::Blockquote => "q",
            Self::Heading => self.as_str(),
        }
    }

    /// Snake-case name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::ListItem => "list_item",
            Self::Blockquote => "blockquote",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BlockType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heading" => Ok(Self::Heading),
            "paragraph" => Ok(Self::Paragraph),
            "list_item" => Ok(Self::ListItem),
            "blockquote" => Ok(Self::Blockquote),
            _ => Err(anyhow::anyhow!("Invalid block type: {}", s)),
        }
    }
}

/// Block-specific auxiliary data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentMetadata {
    Heading {
        level: usize,
        slug: String,
    },
    /// Raw constituent lines, untrimmed
    Paragraph {
        lines: Vec<String>,
    },
    ListItem {
        indent: String,
        marker: String,
    },
    Blockquote,
}

/// One translatable unit of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique within the document
    pub identifier: String,

    /// Document-relative path, forward slashes
    pub file_path: String,

    /// 1-based line of the first contributing line
    pub start_line: usize,

    pub block_type: BlockType,

    /// Sanitized, trimmed text shown to translators
    pub msgid: String,

    /// Records produced while sanitizing this segment
    #[serde(default)]
    pub placeholders: Vec<PlaceholderRecord>,

    /// `root` or the `#`-joined synthetic ids of the open headings
    pub context_path: String,

    /// 1-based position in scan order
    pub order: usize,

    pub metadata: SegmentMetadata,
}

impl Segment {
    /// Restore this segment's own placeholders inside `text`
    pub fn restore_placeholders(&self, text: &str) -> String {
        placeholders::restore(text, &self.placeholders)
    }

    /// Check that a translation kept every token, then restore it.
    ///
    /// Missing or foreign tokens are reported instead of producing a
    /// half-restored string.
    pub fn restore_translation(&self, translated: &str) -> Result<String, ExtractError> {
        let result = TokenValidator::validate(translated, &self.placeholders);
        if !result.passed() {
            return Err(ExtractError::PlaceholderMismatch {
                identifier: self.identifier.clone(),
                missing: result.missing,
                unexpected: result.unexpected,
            });
        }
        Ok(self.restore_placeholders(translated))
    }

    /// Original source text of the segment, fragments restored
    pub fn source_text(&self) -> String {
        self.restore_placeholders(&self.msgid)
    }
}

/// All segments of one document, with a hash of the text they came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSegments {
    pub file_path: String,

    /// SHA-256 of the document text, lowercase hex
    pub source_hash: String,

    pub segments: Vec<Segment>,
}

impl DocumentSegments {
    /// Group `segments` scanned from `text`
    pub fn new(file_path: &str, text: &str, segments: Vec<Segment>) -> Self {
        Self {
            file_path: file_path.to_string(),
            source_hash: hash_source(text),
            segments,
        }
    }

    /// Look a segment up by identifier
    pub fn find(&self, identifier: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.identifier == identifier)
    }
}

/// SHA-256 hex digest of a document's text
pub fn hash_source(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
