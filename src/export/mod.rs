/*!
 * Catalog exporters for extracted segments.
 *
 * - `json`: every segment field, grouped per document
 * - `po`: gettext catalog with identifiers as `msgctxt`
 */

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extraction::DocumentSegments;

pub mod json;
pub mod po;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Po,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Po => "po",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Render documents in the requested format
pub fn render(
    format: ExportFormat,
    documents: &[DocumentSegments],
    target_language: &str,
) -> anyhow::Result<String> {
    match format {
        ExportFormat::Json => json::to_json(documents),
        ExportFormat::Po => Ok(po::to_po(documents, target_language)),
    }
}
