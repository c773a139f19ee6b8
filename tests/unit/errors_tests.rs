/*!
 * Tests for the error types
 */

use mdsegment::errors::ExtractError;

/// Test that the mismatch message lists both token sets
#[test]
fn test_placeholder_mismatch_display_should_list_tokens() {
    let error = ExtractError::PlaceholderMismatch {
        identifier: "a.md#root#p-1".to_string(),
        missing: vec!["[[CODE_1]]".to_string(), "[[URL_2]]".to_string()],
        unexpected: vec!["[[VAR_9]]".to_string()],
    };

    assert_eq!(
        error.to_string(),
        "Placeholder mismatch in a.md#root#p-1: missing [[[CODE_1]], [[URL_2]]], unexpected [[[VAR_9]]]"
    );
}

/// Test that I/O errors convert to file errors
#[test]
fn test_from_io_error_should_be_file_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: ExtractError = io_error.into();

    assert!(matches!(error, ExtractError::File(_)));
    assert!(error.to_string().starts_with("File error:"));
}

/// Test that JSON errors convert to export errors
#[test]
fn test_from_serde_error_should_be_export_error() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: ExtractError = json_error.into();

    assert!(matches!(error, ExtractError::Export(_)));
}

/// Test that anyhow errors keep their message
#[test]
fn test_from_anyhow_should_keep_message() {
    let error: ExtractError = anyhow::anyhow!("boom").into();
    assert_eq!(error.to_string(), "Unknown error: boom");
}

/// Test that the error converts into anyhow for the binary
#[test]
fn test_into_anyhow_should_preserve_display() {
    let error = anyhow::Error::from(ExtractError::Config("bad".to_string()));
    assert_eq!(error.to_string(), "Configuration error: bad");
}
