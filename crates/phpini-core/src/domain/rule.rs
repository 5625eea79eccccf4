//! Replacement rules and rule templates.
//!
//! A [`ReplacementRule`] is a literal `(search, replace)` pair applied to the
//! whole document with every occurrence replaced.  No regular expressions and
//! no whitespace tolerance: `;curl.cainfo  =` (two spaces) does not match
//! `;curl.cainfo =`, and the rule quietly does nothing.
//!
//! A [`RuleTemplate`] is the serialisable form stored in patch profiles.  Its
//! replacement may mention `{cacert}`, which is substituted with the resolved
//! certificate path when the template is turned into a rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::path::ResolvedPath;

/// Placeholder substituted with the resolved certificate path.
pub const CACERT_PLACEHOLDER: &str = "{cacert}";

/// Error type for building rules from templates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// An empty search literal would match between every character.
    #[error("rule #{index} has an empty search literal")]
    EmptySearch { index: usize },

    /// The replacement mentions a placeholder other than `{cacert}`.
    #[error("rule #{index} uses unknown placeholder {{{name}}}")]
    UnknownPlaceholder { index: usize, name: String },
}

/// A literal find-and-replace pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    search: String,
    replace: String,
}

impl ReplacementRule {
    /// Creates a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptySearch`] (with index 0) if `search` is empty.
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Result<Self, RuleError> {
        let search = search.into();
        if search.is_empty() {
            return Err(RuleError::EmptySearch { index: 0 });
        }
        Ok(Self {
            search,
            replace: replace.into(),
        })
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    /// Replaces every non-overlapping occurrence of the search literal in
    /// `document` and returns how many were replaced.
    ///
    /// The document is left untouched (no reallocation) when nothing matches.
    pub fn apply(&self, document: &mut String) -> usize {
        let occurrences = document.matches(self.search.as_str()).count();
        if occurrences > 0 {
            *document = document.replace(self.search.as_str(), &self.replace);
        }
        occurrences
    }
}

/// Serialisable rule whose replacement may contain `{cacert}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleTemplate {
    pub search: String,
    pub replace: String,
}

impl RuleTemplate {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }

    /// Interpolates the certificate path and produces a concrete rule.
    ///
    /// `index` is the template's position in its list and only appears in
    /// error messages.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptySearch`] for an empty search literal and
    /// [`RuleError::UnknownPlaceholder`] for any `{name}` other than
    /// `{cacert}`.
    pub fn render(&self, index: usize, cacert: &ResolvedPath) -> Result<ReplacementRule, RuleError> {
        if self.search.is_empty() {
            return Err(RuleError::EmptySearch { index });
        }
        if let Some(name) = first_unknown_placeholder(&self.replace) {
            return Err(RuleError::UnknownPlaceholder {
                index,
                name: name.to_string(),
            });
        }
        Ok(ReplacementRule {
            search: self.search.clone(),
            replace: self.replace.replace(CACERT_PLACEHOLDER, cacert.as_str()),
        })
    }
}

/// Finds the first `{identifier}` that is not `{cacert}`.
///
/// Braces that do not enclose an identifier (`{`, `{}`, `{a b}`) are literal
/// text, so ini values containing braces pass through unchanged.
fn first_unknown_placeholder(template: &str) -> Option<&str> {
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after.find('}')?;
        let name = &after[..close];
        if is_identifier(name) && name != "cacert" {
            return Some(name);
        }
        rest = &after[close + 1..];
    }
    None
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ── Tests ─────────────────────────────────────────────────────────────────────
