/*!
 * URL-safe slugs for headings and identifiers.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::placeholders::PLACEHOLDER_REGEX;

/// Fallback slug for headings whose text normalizes to nothing
pub const DEFAULT_HEADING_SLUG: &str = "section";

/// Runs of characters that are not allowed in a slug
static NON_SLUG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9]+").expect("Invalid slug regex")
});

/// Normalize arbitrary text into a lowercase, hyphenated ASCII slug.
///
/// Placeholder tokens are dropped first so they never leak into a slug.
/// Accented letters lose their marks through NFKD decomposition and any
/// remaining non-ASCII code points are discarded. Returns `default` when
/// nothing survives.
pub fn slugify(text: &str, default: &str) -> String {
    let without_tokens = PLACEHOLDER_REGEX.replace_all(text, " ");

    let ascii: String = without_tokens
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase();

    let slug = NON_SLUG_REGEX.replace_all(&ascii, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        default.to_string()
    } else {
        slug.to_string()
    }
}
