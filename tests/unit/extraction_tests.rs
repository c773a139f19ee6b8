/*!
 * Whole-document tests for segment extraction
 */

use std::collections::HashSet;
use mdsegment::extraction::{collect_segments, sanitize, restore, BlockType, SegmentMetadata};
use crate::common::SAMPLE_GUIDE;

/// Test the full segment list of the sample guide
#[test]
fn test_collect_segments_on_sample_guide_should_emit_expected_blocks() {
    let segments = collect_segments(SAMPLE_GUIDE, "guide.md");

    let kinds: Vec<BlockType> = segments.iter().map(|s| s.block_type).collect();
    assert_eq!(
        kinds,
        vec![
            BlockType::Heading,
            BlockType::Paragraph,
            BlockType::Heading,
            BlockType::ListItem,
            BlockType::ListItem,
            BlockType::Blockquote,
            BlockType::Heading,
            BlockType::Paragraph,
        ]
    );

    let ids: Vec<&str> = segments.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "guide.md#h1-install-guide#title",
            "guide.md#h1-install-guide#p-1",
            "guide.md#h1-install-guide#h2-usage#title",
            "guide.md#h1-install-guide#h2-usage#li-1",
            "guide.md#h1-install-guide#h2-usage#li-2",
            "guide.md#h1-install-guide#h2-usage#q-1",
            "guide.md#h1-install-guide#h2-usage-2#title",
            "guide.md#h1-install-guide#h2-usage-2#p-1",
        ]
    );
}

/// Test that inline fragments are replaced in the paragraph and list items
#[test]
fn test_collect_segments_on_sample_guide_should_protect_inline_fragments() {
    let segments = collect_segments(SAMPLE_GUIDE, "guide.md");

    assert_eq!(
        segments[1].msgid,
        "Run [[CODE_1]] to get the [binary]([[URL_2]][[TITLE_3]])."
    );
    assert_eq!(segments[3].msgid, "Scan a folder with [[VAR_1]]");
    assert!(segments[4].msgid.starts_with("Check [[HTML_1]]every[[HTML_2]] result"));
    assert_eq!(segments[5].msgid, "Translations keep\ntheir placeholders.");
}

/// Test that fenced code never reaches a segment
#[test]
fn test_collect_segments_should_skip_fenced_code() {
    let segments = collect_segments(SAMPLE_GUIDE, "guide.md");
    assert!(segments.iter().all(|s| !s.msgid.contains("extract docs/")));
}

/// Test that source text round-trips through the placeholders
#[test]
fn test_source_text_should_restore_original_fragments() {
    let segments = collect_segments(SAMPLE_GUIDE, "guide.md");

    assert_eq!(
        segments[1].source_text(),
        r#"Run `cargo install mdsegment` to get the [binary](https://example.com/dl "Download")."#
    );
    assert_eq!(segments[3].source_text(), "Scan a folder with {command}");
}

/// Test that identifiers are unique and orders contiguous
#[test]
fn test_collect_segments_should_number_consistently() {
    let segments = collect_segments(SAMPLE_GUIDE, "guide.md");

    let unique: HashSet<&str> = segments.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(unique.len(), segments.len());

    for (index, segment) in segments.iter().enumerate() {
        assert_eq!(segment.order, index + 1);
        assert_eq!(segment.file_path, "guide.md");
        assert!(!segment.msgid.is_empty());
        assert!(segment.identifier.starts_with("guide.md#"));
    }
}

/// Test that headings whose text looks like a numbered repeat stay unique
#[test]
fn test_collect_segments_with_numbered_heading_text_should_keep_identifiers_unique() {
    let text = "## Setup 2\n\nz\n\n## Setup\n\na\n\n## Setup\n\nb\n\n## Setup 2\n\nc\n\n## Setup\n\nd\n";
    let segments = collect_segments(text, "a.md");
    assert_eq!(segments.len(), 10);

    let unique: HashSet<&str> = segments.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(unique.len(), segments.len());

    let contexts: HashSet<&str> = segments.iter().map(|s| s.context_path.as_str()).collect();
    assert_eq!(contexts.len(), 5);
    assert!(segments
        .iter()
        .filter(|s| s.block_type == BlockType::Paragraph)
        .all(|s| s.identifier.ends_with("#p-1")));
}

/// Test that scanning the same text twice gives the same result
#[test]
fn test_collect_segments_should_be_deterministic() {
    assert_eq!(
        collect_segments(SAMPLE_GUIDE, "guide.md"),
        collect_segments(SAMPLE_GUIDE, "guide.md")
    );
}

/// Test that an edit in one section leaves identifiers of other sections alone
#[test]
fn test_identifiers_should_survive_edits_in_other_sections() {
    let before = "# A\n\nAlpha.\n\n# B\n\nBeta.\n";
    let after = "# A\n\nAlpha.\n\nInserted.\n\n# B\n\nBeta.\n";

    let find = |text: &str, msgid: &str| {
        collect_segments(text, "x.md")
            .into_iter()
            .find(|s| s.msgid == msgid)
            .map(|s| s.identifier)
    };

    assert_eq!(find(before, "Beta."), find(after, "Beta."));
    assert_eq!(find(after, "Beta."), Some("x.md#h1-b#p-1".to_string()));
}

/// Test that headings record level and slug
#[test]
fn test_heading_metadata_should_carry_level_and_slug() {
    let segments = collect_segments("### Café Menu ###\n", "x.md");

    assert_eq!(
        segments[0].metadata,
        SegmentMetadata::Heading { level: 3, slug: "cafe-menu".to_string() }
    );
}

/// Test that empty and whitespace-only documents yield nothing
#[test]
fn test_collect_segments_with_blank_input_should_be_empty() {
    assert!(collect_segments("", "x.md").is_empty());
    assert!(collect_segments("\n   \n\t\n", "x.md").is_empty());
}

/// Test that sanitize and restore are inverse on mixed inline content
#[test]
fn test_sanitize_then_restore_should_round_trip() {
    let samples = [
        "plain text",
        "Call `f()` with {name} at https://a.test/x?y=1",
        "![logo](img/logo.png \"Logo\") and <kbd>Ctrl</kbd>",
        "Nested {{raw}} braces and `code with [link](u)`",
    ];

    for sample in samples {
        let (sanitized, records) = sanitize(sample);
        assert_eq!(restore(&sanitized, &records), sample, "round trip failed for {:?}", sample);
    }
}
