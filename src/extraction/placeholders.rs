/*!
 * Placeholder substitution for non-translatable inline fragments.
 *
 * Inline code, link targets, bare URLs, HTML fragments and template
 * variables are swapped for `[[KIND_n]]` tokens before a segment is handed
 * to translators, and swapped back afterwards. The passes run in a fixed
 * order and each one scans the output of the previous pass, so a fragment
 * claimed by an earlier pass is invisible to the later ones.
 */

use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of every token produced by [`sanitize`]
pub const PLACEHOLDER_PATTERN: &str = r"\[\[[A-Z]+_\d+\]\]";

/// Regex for matching placeholder tokens
pub static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(PLACEHOLDER_PATTERN).expect("Invalid placeholder regex")
});

/// Inline code spans: `code`
static CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`([^`]+)`").expect("Invalid inline code regex")
});

/// Links and images: [text](url "title") and ![alt](url)
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(!)?\[(?P<text>[^\]]+)\]\((?P<url>[^)\s]+)(?P<title>\s+"[^"]*")?\)"#)
        .expect("Invalid link regex")
});

/// Bare http(s) URLs
static RAW_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[^\s)]+").expect("Invalid raw URL regex")
});

/// HTML tags and autolinks: <...>
static ANGLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").expect("Invalid angle bracket regex")
});

/// Template variables: {name}
static VARIABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^{}\s][^{}]*\}").expect("Invalid variable regex")
});

/// Kind of fragment hidden behind a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaceholderKind {
    /// Inline code span, backticks included
    Code,
    /// Link target or bare URL
    Url,
    /// Link title, with its quotes and leading whitespace
    Title,
    /// HTML tag or other angle-bracket span
    Html,
    /// Brace-delimited template variable
    Var,
}

impl PlaceholderKind {
    /// Uppercase tag used inside the token
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Url => "URL",
            Self::Title => "TITLE",
            Self::Html => "HTML",
            Self::Var => "VAR",
        }
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A token and the original fragment it stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderRecord {
    /// Token as it appears in the sanitized text, e.g. `[[CODE_1]]`
    pub token: String,
    /// Fragment the token replaced
    pub original: String,
}

impl PlaceholderRecord {
    /// Kind parsed back out of the token
    pub fn kind(&self) -> Option<PlaceholderKind> {
        let inner = self.token.strip_prefix("[[")?.strip_suffix("]]")?;
        let (tag, _) = inner.rsplit_once('_')?;
        match tag {
            "CODE" => Some(PlaceholderKind::Code),
            "URL" => Some(PlaceholderKind::Url),
            "TITLE" => Some(PlaceholderKind::Title),
            "HTML" => Some(PlaceholderKind::Html),
            "VAR" => Some(PlaceholderKind::Var),
            _ => None,
        }
    }
}

/// Hands out tokens for one sanitization pass.
///
/// The counter is shared by every kind, so tokens are numbered in
/// discovery order regardless of their tag.
#[derive(Debug, Default)]
struct PlaceholderRegistry {
    counter: usize,
    records: Vec<PlaceholderRecord>,
}

impl PlaceholderRegistry {
    fn add(&mut self, kind: PlaceholderKind, original: &str) -> String {
        self.counter += 1;
        let token = format!("[[{}_{}]]", kind.tag(), self.counter);
        trace!("{} -> {:?}", token, original);
        self.records.push(PlaceholderRecord {
            token: token.clone(),
            original: original.to_string(),
        });
        token
    }

    fn into_records(self) -> Vec<PlaceholderRecord> {
        self.records
    }
}

/// Replace non-translatable inline fragments with placeholder tokens.
///
/// Returns the sanitized text and the records needed to undo it, in the
/// order the tokens were issued.
pub fn sanitize(text: &str) -> (String, Vec<PlaceholderRecord>) {
    let mut registry = PlaceholderRegistry::default();

    let text = CODE_REGEX
        .replace_all(text, |caps: &Captures| {
            registry.add(PlaceholderKind::Code, &caps[0])
        })
        .into_owned();

    let text = LINK_REGEX
        .replace_all(&text, |caps: &Captures| {
            let prefix = if caps.get(1).is_some() { "!" } else { "" };
            let url_token = registry.add(PlaceholderKind::Url, &caps["url"]);
            // No separator between the URL and title tokens
            let title_token = match caps.name("title") {
                Some(title) => registry.add(PlaceholderKind::Title, title.as_str()),
                None => String::new(),
            };
            format!("{}[{}]({}{})", prefix, &caps["text"], url_token, title_token)
        })
        .into_owned();

    let text = RAW_URL_REGEX
        .replace_all(&text, |caps: &Captures| {
            registry.add(PlaceholderKind::Url, &caps[0])
        })
        .into_owned();

    let text = ANGLE_REGEX
        .replace_all(&text, |caps: &Captures| {
            let value = &caps[0];
            let kind = if value.starts_with("<http") {
                PlaceholderKind::Url
            } else {
                PlaceholderKind::Html
            };
            registry.add(kind, value)
        })
        .into_owned();

    let text = VARIABLE_REGEX
        .replace_all(&text, |caps: &Captures| {
            registry.add(PlaceholderKind::Var, &caps[0])
        })
        .into_owned();

    (text, registry.into_records())
}

/// Put the original fragments back in place of their tokens.
///
/// Records are applied in the order they were produced.
pub fn restore(text: &str, records: &[PlaceholderRecord]) -> String {
    let mut restored = text.to_string();
    for record in records {
        restored = restored.replace(&record.token, &record.original);
    }
    restored
}

/// All placeholder-shaped tokens in `text`, left to right
pub fn find_tokens(text: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}
