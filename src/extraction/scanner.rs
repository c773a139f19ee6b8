/*!
 * Line-oriented block scanner.
 *
 * Walks a document once, top to bottom, and turns headings, paragraphs,
 * list items and blockquotes into `Segment`s. Fenced code is skipped
 * entirely. Every recognized block goes through `register_segment`, which
 * sanitizes it, drops it if nothing translatable is left, and assigns its
 * identifier and order.
 */

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use super::context::{ContextTracker, IdentifierBuilder};
use super::placeholders::sanitize;
use super::segment::{BlockType, Segment, SegmentMetadata};

/// Opening or closing fence: 3+ backticks or tildes, optionally indented
static FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(`{3,}|~{3,})").expect("Invalid fence regex")
});

/// ATX heading, matched against the trimmed line
static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})\s+(.*)$").expect("Invalid heading regex")
});

/// List item with its content
static LIST_ITEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)([-+*]|\d+\.)\s+(.*)$").expect("Invalid list item regex")
});

/// Any list marker, used to end item continuation
static LIST_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)([-+*]|\d+\.)\s+").expect("Invalid list marker regex")
});

/// Tab width used when measuring a list marker's indent
const TAB_WIDTH: usize = 4;

/// Scanner state for a single document.
///
/// Every counter and the heading stack live here and are dropped when
/// `scan` returns; nothing carries over to the next document.
pub struct BlockScanner {
    /// Document-relative path, forward slashes
    file_path: String,
    /// Open headings and slug counters
    context: ContextTracker,
    /// Per (context, block type) counters
    identifiers: IdentifierBuilder,
    /// Raw lines of the paragraph being accumulated
    paragraph_lines: Vec<String>,
    /// Line number of the first buffered paragraph line
    paragraph_start: Option<usize>,
    /// Marker of the open fence, if any
    fence_marker: Option<String>,
    /// Last order value handed out
    order: usize,
    segments: Vec<Segment>,
}

impl BlockScanner {
    /// Create a scanner for the document at `file_path`
    pub fn new(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            context: ContextTracker::new(),
            identifiers: IdentifierBuilder::new(file_path),
            paragraph_lines: Vec::new(),
            paragraph_start: None,
            fence_marker: None,
            order: 0,
            segments: Vec::new(),
        }
    }

    /// Scan `text` and return its segments in source order
    pub fn scan(mut self, text: &str) -> Vec<Segment> {
        let lines = split_lines(text);
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            let stripped = line.trim();
            let line_no = i + 1;

            if let Some(caps) = FENCE_REGEX.captures(line) {
                let marker = &caps[2];
                if self.fence_marker.is_none() {
                    self.flush_paragraph();
                    debug!("Fence {} opened at line {}", marker, line_no);
                    self.fence_marker = Some(marker.to_string());
                } else if self.fence_marker.as_deref() == Some(marker) {
                    debug!("Fence {} closed at line {}", marker, line_no);
                    self.fence_marker = None;
                }
                i += 1;
                continue;
            }

            if self.fence_marker.is_some() {
                i += 1;
                continue;
            }

            if let Some(caps) = HEADING_REGEX.captures(stripped) {
                self.flush_paragraph();
                let level = caps[1].len();
                let raw_heading = caps[2].trim_end_matches('#').trim();
                let entry = self.context.enter_heading(level, raw_heading);
                self.register_segment(
                    BlockType::Heading,
                    line_no,
                    raw_heading,
                    SegmentMetadata::Heading {
                        level,
                        slug: entry.slug,
                    },
                );
                i += 1;
                continue;
            }

            if let Some(caps) = LIST_ITEM_REGEX.captures(line) {
                self.flush_paragraph();
                let indent = caps[1].to_string();
                let marker = caps[2].to_string();
                let mut item_lines = vec![caps[3].to_string()];
                let base_indent = expanded_width(&indent);
                i += 1;

                while i < lines.len() {
                    let next_line = lines[i];
                    let next_indent = leading_spaces(next_line);

                    if next_indent <= base_indent && LIST_MARKER_REGEX.is_match(next_line) {
                        break;
                    }
                    if next_line.trim().is_empty() {
                        item_lines.push(String::new());
                        i += 1;
                        continue;
                    }
                    if next_indent > base_indent {
                        // The first base_indent bytes are all spaces here
                        item_lines.push(next_line[base_indent..].to_string());
                        i += 1;
                        continue;
                    }
                    break;
                }

                let content = item_lines.join("\n");
                self.register_segment(
                    BlockType::ListItem,
                    line_no,
                    content.trim_matches('\n'),
                    SegmentMetadata::ListItem { indent, marker },
                );
                continue;
            }

            if stripped.starts_with('>') {
                self.flush_paragraph();
                let mut quote_lines: Vec<&str> = Vec::new();

                while i < lines.len() {
                    let quote_line = lines[i].trim_start();
                    if let Some(rest) = quote_line.strip_prefix('>') {
                        quote_lines.push(rest.trim_start());
                        i += 1;
                        continue;
                    }
                    if quote_line.is_empty() {
                        quote_lines.push("");
                        i += 1;
                        continue;
                    }
                    break;
                }

                let content = quote_lines.join("\n");
                self.register_segment(
                    BlockType::Blockquote,
                    line_no,
                    content.trim_matches('\n'),
                    SegmentMetadata::Blockquote,
                );
                continue;
            }

            if stripped.is_empty() {
                self.flush_paragraph();
                i += 1;
                continue;
            }

            if self.paragraph_lines.is_empty() {
                self.paragraph_start = Some(line_no);
            }
            self.paragraph_lines.push(line.to_string());
            i += 1;
        }

        if let Some(marker) = &self.fence_marker {
            debug!(
                "{}: fence {} never closed, content after it was skipped",
                self.file_path, marker
            );
        }
        self.flush_paragraph();

        debug!("{}: collected {} segments", self.file_path, self.segments.len());
        self.segments
    }

    /// Register the buffered paragraph, if any, and clear the buffer
    fn flush_paragraph(&mut self) {
        if self.paragraph_lines.is_empty() {
            return;
        }

        let lines = std::mem::take(&mut self.paragraph_lines);
        let start_line = self.paragraph_start.take().unwrap_or(1);
        let joined = lines.join("\n");
        let text = joined.trim_matches('\n');

        if !text.trim().is_empty() {
            self.register_segment(
                BlockType::Paragraph,
                start_line,
                text,
                SegmentMetadata::Paragraph { lines },
            );
        }
    }

    /// Sanitize `content` and append it as a segment unless it is empty
    fn register_segment(
        &mut self,
        block_type: BlockType,
        start_line: usize,
        content: &str,
        metadata: SegmentMetadata,
    ) {
        let (sanitized, placeholders) = sanitize(content);
        let msgid = sanitized.trim();
        if msgid.is_empty() {
            trace!(
                "{}:{}: dropping empty {}",
                self.file_path, start_line, block_type
            );
            return;
        }

        let context_path = self.context.current_context();
        let identifier = self.identifiers.identifier_for(&context_path, block_type);
        self.order += 1;

        self.segments.push(Segment {
            identifier,
            file_path: self.file_path.clone(),
            start_line,
            block_type,
            msgid: msgid.to_string(),
            placeholders,
            context_path,
            order: self.order,
            metadata,
        });
    }
}

/// Scan one document's text into segments
pub fn collect_segments(text: &str, rel_path: &str) -> Vec<Segment> {
    BlockScanner::new(rel_path).scan(text)
}

/// Characters that end a line
fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` into lines without their terminators.
///
/// `\r\n` counts as one break. A lone `\r` and the Unicode line and
/// paragraph separators end a line too. A final terminator does not
/// produce a trailing empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Column width of a whitespace prefix with tabs expanded
fn expanded_width(indent: &str) -> usize {
    indent.chars().fold(0, |column, ch| {
        if ch == '\t' {
            column + TAB_WIDTH - column % TAB_WIDTH
        } else {
            column + 1
        }
    })
}

/// Number of leading space characters (tabs not counted)
fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
