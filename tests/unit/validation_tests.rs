/*!
 * Tests for placeholder checks on translated text
 */

use mdsegment::errors::ExtractError;
use mdsegment::extraction::collect_segments;
use mdsegment::validation::TokenValidator;

/// Test that a faithful translation restores the original fragments
#[test]
fn test_restore_translation_with_all_tokens_should_restore() {
    let segments = collect_segments("Run `make` then open [docs](https://d.test).\n", "a.md");
    let segment = &segments[0];

    let restored = segment
        .restore_translation("Lancez [[CODE_1]] puis ouvrez [docs]([[URL_2]]).")
        .unwrap();

    assert_eq!(restored, "Lancez `make` puis ouvrez [docs](https://d.test).");
}

/// Test that reordered tokens are accepted but flagged
#[test]
fn test_validate_with_reordered_tokens_should_pass_and_flag() {
    let segments = collect_segments("Use `a` before `b`.\n", "a.md");
    let result = TokenValidator::validate("[[CODE_2]] après [[CODE_1]].", &segments[0].placeholders);

    assert!(result.passed());
    assert!(result.out_of_order);
}

/// Test that a dropped token is reported with the segment identifier
#[test]
fn test_restore_translation_with_missing_token_should_fail() {
    let segments = collect_segments("Use `a` before `b`.\n", "a.md");

    match segments[0].restore_translation("Utilisez [[CODE_1]].") {
        Err(ExtractError::PlaceholderMismatch { identifier, missing, unexpected }) => {
            assert_eq!(identifier, "a.md#root#p-1");
            assert_eq!(missing, vec!["[[CODE_2]]".to_string()]);
            assert!(unexpected.is_empty());
        }
        other => panic!("expected mismatch, got {:?}", other),
    }
}

/// Test that tokens from another segment are rejected
#[test]
fn test_restore_translation_with_foreign_token_should_fail() {
    let segments = collect_segments("Plain sentence.\n", "a.md");
    let result = segments[0].restore_translation("Phrase [[URL_7]].");

    assert!(matches!(result, Err(ExtractError::PlaceholderMismatch { .. })));
}

/// Test that a duplicated token fails validation
#[test]
fn test_validate_with_duplicated_token_should_fail() {
    let segments = collect_segments("See `x`.\n", "a.md");
    let result = TokenValidator::validate("[[CODE_1]] et [[CODE_1]]", &segments[0].placeholders);

    assert!(!result.passed());
    assert_eq!(result.duplicated, vec!["[[CODE_1]]".to_string()]);
}
