/*!
 * Validation of translated segment text.
 *
 * - `tokens`: checks that placeholder tokens survive translation
 */

pub mod tokens;

// Re-export main types
pub use tokens::{TokenValidationResult, TokenValidator};
