/*!
 * Placeholder token validation for translated segments.
 *
 * A translated `msgstr` has to carry every `[[KIND_n]]` token of its
 * segment exactly once before the original fragments can be put back.
 * Translators may move tokens around, but must not drop, invent or
 * duplicate them.
 */

use log::debug;
use std::collections::HashMap;

use crate::extraction::placeholders::{find_tokens, PlaceholderRecord};

/// Token validation result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenValidationResult {
    /// Tokens of the segment, in source order
    pub expected: Vec<String>,
    /// Tokens found in the translation, left to right
    pub found: Vec<String>,
    /// Expected tokens absent from the translation
    pub missing: Vec<String>,
    /// Token-shaped strings in the translation that the segment never issued
    pub unexpected: Vec<String>,
    /// Expected tokens that occur more than once
    pub duplicated: Vec<String>,
    /// Tokens were reordered relative to the source (allowed)
    pub out_of_order: bool,
    /// Error message if validation failed
    pub error_message: Option<String>,
}

impl TokenValidationResult {
    /// Check if validation passed; reordering alone does not fail it
    pub fn passed(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.duplicated.is_empty()
    }
}

/// Token validator for translated text
pub struct TokenValidator;

impl TokenValidator {
    /// Validate `translated` against the records of its source segment
    ///
    /// # Arguments
    /// * `translated` - The translated text, tokens still embedded
    /// * `records` - Placeholder records of the source segment
    ///
    /// # Returns
    /// * `TokenValidationResult` with validation details
    pub fn validate(translated: &str, records: &[PlaceholderRecord]) -> TokenValidationResult {
        let expected: Vec<String> = records.iter().map(|r| r.token.clone()).collect();
        let found: Vec<String> = find_tokens(translated).into_iter().map(str::to_string).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in &found {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let missing: Vec<String> = expected
            .iter()
            .filter(|token| !counts.contains_key(token.as_str()))
            .cloned()
            .collect();

        let mut unexpected: Vec<String> = Vec::new();
        for token in &found {
            if !expected.contains(token) && !unexpected.contains(token) {
                unexpected.push(token.clone());
            }
        }

        let duplicated: Vec<String> = expected
            .iter()
            .filter(|token| counts.get(token.as_str()).copied().unwrap_or(0) > 1)
            .cloned()
            .collect();

        let found_expected: Vec<&String> = found.iter().filter(|t| expected.contains(t)).collect();
        let source_order: Vec<&String> = expected
            .iter()
            .filter(|t| counts.contains_key(t.as_str()))
            .collect();
        let mut first_seen: Vec<&String> = Vec::new();
        for token in found_expected {
            if !first_seen.contains(&token) {
                first_seen.push(token);
            }
        }
        let out_of_order = first_seen != source_order;

        let error_message = if !missing.is_empty() {
            Some(format!("Missing tokens: {}", missing.join(", ")))
        } else if !unexpected.is_empty() {
            Some(format!("Unexpected tokens: {}", unexpected.join(", ")))
        } else if !duplicated.is_empty() {
            Some(format!("Duplicated tokens: {}", duplicated.join(", ")))
        } else {
            None
        };

        debug!(
            "Token validation: expected={}, found={}, missing={}, unexpected={}",
            expected.len(),
            found.len(),
            missing.len(),
            unexpected.len()
        );

        TokenValidationResult {
            expected,
            found,
            missing,
            unexpected,
            duplicated,
            out_of_order,
            error_message,
        }
    }
}
