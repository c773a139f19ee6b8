/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use mdsegment::app_config::{Config, LogLevel};
use mdsegment::export::ExportFormat;
use crate::common;

/// Test that a saved configuration loads back identically
#[test]
fn test_save_then_load_should_preserve_values() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "de".to_string();
    config.export.format = ExportFormat::Po;
    config.extraction.concurrency = 8;
    config.database.enabled = true;
    config.database.path = Some("tm.db".to_string());
    config.log_level = LogLevel::Debug;
    config.save_to_file(&path)?;

    let loaded = Config::from_file(&path)?;

    assert_eq!(loaded.target_language, "de");
    assert_eq!(loaded.export.format, ExportFormat::Po);
    assert_eq!(loaded.extraction.concurrency, 8);
    assert!(loaded.database.enabled);
    assert_eq!(loaded.database_path().unwrap().to_string_lossy(), "tm.db");
    assert_eq!(loaded.log_level, LogLevel::Debug);

    Ok(())
}

/// Test that the file format uses lowercase enum names
#[test]
fn test_from_file_with_lowercase_enums_should_parse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "log_level": "warn",
            "export": { "format": "po", "output_path": "fr.po" },
            "extraction": { "extensions": ["md", "markdown"] }
        }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.export.format, ExportFormat::Po);
    assert_eq!(config.export.output_path, "fr.po");
    assert_eq!(config.extraction.extensions.len(), 2);
    assert_eq!(config.extraction.concurrency, 4);
    assert!(config.validate().is_ok());

    Ok(())
}

/// Test that malformed JSON is rejected with the path in the message
#[test]
fn test_from_file_with_invalid_json_should_fail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let error = Config::from_file(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("broken.json"));

    Ok(())
}

/// Test that empty language codes fail validation
#[test]
fn test_validate_with_empty_language_should_fail() {
    let mut config = Config::default();
    config.source_language = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.target_language = String::new();
    assert!(config.validate().is_err());
}

/// Test that log levels map onto log filters
#[test]
fn test_log_level_should_map_to_filter() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
