/*!
 * Heading ancestry and segment identifiers.
 *
 * `ContextTracker` keeps the chain of open headings for the document being
 * scanned; `IdentifierBuilder` turns that chain plus a block type into a
 * stable identifier. Both live for exactly one document scan.
 */

use log::trace;
use std::collections::{HashMap, HashSet};

use super::segment::BlockType;
use super::slug::{slugify, DEFAULT_HEADING_SLUG};

/// Context path used when no heading is open
pub const ROOT_CONTEXT: &str = "root";

/// Separator between context elements and identifier parts
pub const CONTEXT_SEPARATOR: &str = "#";

/// One open heading on the context stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Heading level, 1 to 6
    pub level: usize,
    /// Disambiguated slug, e.g. `install-2`
    pub slug: String,
    /// Synthetic id used in context paths, e.g. `h2-install-2`
    pub synthetic_id: String,
}

/// Tracks the currently open headings of one document
#[derive(Debug, Default)]
pub struct ContextTracker {
    /// Open headings, outermost first
    stack: Vec<HeadingEntry>,
    /// Last suffix number handed out per (level, base slug)
    slug_counters: HashMap<(usize, String), usize>,
    /// Every slug already issued per level, bare or numbered
    issued_slugs: HashSet<(usize, String)>,
}

impl ContextTracker {
    /// Create an empty tracker (context is `root`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a heading of `level`, closing every open heading at the same
    /// level or deeper, and return the entry pushed for it.
    ///
    /// The first heading with a given level and base slug keeps the bare
    /// slug; later ones get `-2`, `-3`, ... skipping any slug already
    /// issued at that level.
    pub fn enter_heading(&mut self, level: usize, text: &str) -> HeadingEntry {
        while self.stack.last().is_some_and(|entry| entry.level >= level) {
            self.stack.pop();
        }

        let base_slug = slugify(text, DEFAULT_HEADING_SLUG);
        let counter = self
            .slug_counters
            .entry((level, base_slug.clone()))
            .or_insert(0);

        // Skip numbered candidates another heading already owns, e.g. a
        // literal "Setup 2" heading holding `setup-2`
        let slug = loop {
            *counter += 1;
            let candidate = if *counter > 1 {
                format!("{}-{}", base_slug, counter)
            } else {
                base_slug.clone()
            };
            if !self.issued_slugs.contains(&(level, candidate.clone())) {
                break candidate;
            }
        };
        self.issued_slugs.insert((level, slug.clone()));

        let entry = HeadingEntry {
            level,
            synthetic_id: format!("h{}-{}", level, slug),
            slug,
        };
        trace!("Entering heading {}", entry.synthetic_id);
        self.stack.push(entry.clone());
        entry
    }

    /// `root`, or the synthetic ids of the open headings joined by `#`
    pub fn current_context(&self) -> String {
        if self.stack.is_empty() {
            return ROOT_CONTEXT.to_string();
        }
        self.stack
            .iter()
            .map(|entry| entry.synthetic_id.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }

    /// Number of open headings
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Builds segment identifiers for one document
#[derive(Debug)]
pub struct IdentifierBuilder {
    file_path: String,
    /// Segments registered so far per (context path, block type)
    block_counters: HashMap<(String, BlockType), usize>,
}

impl IdentifierBuilder {
    /// Create a builder for the document at `file_path`
    pub fn new(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            block_counters: HashMap::new(),
        }
    }

    /// Identifier of a heading; `context` must already include the heading
    pub fn heading_identifier(&self, context: &str) -> String {
        format!("{}#{}#title", self.file_path, context)
    }

    /// Identifier of a non-heading block, numbered within its context
    pub fn block_identifier(&mut self, context: &str, block_type: BlockType) -> String {
        let count = self
            .block_counters
            .entry((context.to_string(), block_type))
            .or_insert(0);
        *count += 1;
        format!("{}#{}#{}-{}", self.file_path, context, block_type.suffix(), count)
    }

    /// Identifier for any block type
    pub fn identifier_for(&mut self, context: &str, block_type: BlockType) -> String {
        match block_type {
            BlockType::Heading => self.heading_identifier(context),
            other => self.block_identifier(context, other),
        }
    }
}
