/*!
 * Gettext PO export of extracted segments.
 *
 * Each segment becomes one entry keyed by its identifier in `msgctxt`,
 * so identical source strings in different places stay separate. The
 * placeholder records are written as extracted comments for translators.
 */

use std::fmt::Write;

use crate::extraction::{DocumentSegments, Segment};

/// Render all documents as a single PO catalog
pub fn to_po(documents: &[DocumentSegments], target_language: &str) -> String {
    let mut out = String::new();

    out.push_str("msgid \"\"\n");
    out.push_str("msgstr \"\"\n");
    out.push_str("\"Content-Type: text/plain; charset=UTF-8\\n\"\n");
    let _ = writeln!(out, "\"Language: {}\\n\"", escape(target_language));

    for document in documents {
        for segment in &document.segments {
            out.push('\n');
            write_entry(&mut out, segment);
        }
    }

    out
}

fn write_entry(out: &mut String, segment: &Segment) {
    let _ = writeln!(out, "#. block: {}", segment.block_type);
    for record in &segment.placeholders {
        let _ = writeln!(
            out,
            "#. placeholder {} = {}",
            record.token,
            record.original.replace('\n', "\\n")
        );
    }
    let _ = writeln!(out, "#: {}:{}", segment.file_path, segment.start_line);
    write_string(out, "msgctxt", &segment.identifier);
    write_string(out, "msgid", &segment.msgid);
    write_string(out, "msgstr", "");
}

/// Write `keyword "value"`, splitting multi-line values gettext-style
fn write_string(out: &mut String, keyword: &str, value: &str) {
    if !value.contains('\n') {
        let _ = writeln!(out, "{} \"{}\"", keyword, escape(value));
        return;
    }

    let _ = writeln!(out, "{} \"\"", keyword);
    let mut rest = value;
    while let Some(pos) = rest.find('\n') {
        let _ = writeln!(out, "\"{}\\n\"", escape(&rest[..pos]));
        rest = &rest[pos + 1..];
    }
    if !rest.is_empty() {
        let _ = writeln!(out, "\"{}\"", escape(rest));
    }
}

/// Escape a string for use inside PO quotes
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}
