use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::export::ExportFormat;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code of the documents
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code written into catalog headers
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Translation-memory store settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for document discovery and scanning
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    // @field: File extensions treated as markdown
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    // @field: Documents scanned at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            concurrency: default_concurrency(),
        }
    }
}

/// Settings for the exported catalog
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    // @field: Catalog format
    #[serde(default)]
    pub format: ExportFormat,

    // @field: Output file path
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            output_path: default_output_path(),
        }
    }
}

/// Settings for the SQLite translation-memory store
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    // @field: Whether segments are written to the store
    #[serde(default)]
    pub enabled: bool,

    // @field: Database file; platform data directory when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "fr".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_concurrency() -> usize {
    4
}

fn default_output_path() -> String {
    "segments.json".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path.as_ref(), config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language must not be empty"));
        }

        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }

        if self.extraction.extensions.is_empty()
            || self.extraction.extensions.iter().any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(anyhow!("At least one non-empty file extension is required"));
        }

        if self.extraction.concurrency == 0 {
            return Err(anyhow!("Extraction concurrency must be at least 1"));
        }

        if self.export.output_path.trim().is_empty() {
            return Err(anyhow!("Export output path must not be empty"));
        }

        Ok(())
    }

    /// Database file to use when the store is enabled
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.path.as_ref().map(PathBuf::from)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            extraction: ExtractionConfig::default(),
            export: ExportConfig::default(),
            database: DatabaseConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
