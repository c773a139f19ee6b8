/*!
 * Segment extraction from lightweight markup documents.
 *
 * This module is the pure core of the crate. It performs no I/O and never
 * fails; malformed markup degrades into paragraphs instead. Submodules:
 *
 * - `placeholders`: reversible protection of inline code, links, URLs, HTML and variables
 * - `slug`: ASCII slugs for headings
 * - `context`: heading ancestry tracking and identifier construction
 * - `segment`: the `Segment` data model
 * - `scanner`: the line-oriented block scanner
 */

// Re-export main types for easier usage
pub use self::context::{ContextTracker, HeadingEntry, IdentifierBuilder, ROOT_CONTEXT};
pub use self::placeholders::{
    find_tokens, restore, sanitize, PlaceholderKind, PlaceholderRecord, PLACEHOLDER_PATTERN,
};
pub use self::scanner::{collect_segments, BlockScanner};
pub use self::segment::{hash_source, BlockType, DocumentSegments, Segment, SegmentMetadata};
pub use self::slug::{slugify, DEFAULT_HEADING_SLUG};

// Submodules
pub mod context;
pub mod placeholders;
pub mod scanner;
pub mod segment;
pub mod slug;
