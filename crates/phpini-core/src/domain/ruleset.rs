//! Ordered rulesets and the patch report.
//!
//! Rules are applied once each, in order, and each sees the document as left
//! by the rules before it.  The six default rules never overlap, so for them
//! the order is only observable in the report.
//!
//! # Idempotence
//!
//! Every default rule removes its own search literal (the leading `;`), so a
//! second pass over an already-patched document matches nothing and the
//! report's [`PatchReport::changed`] is `false`.  Custom rules from a profile
//! are idempotent only if their replacement does not contain their search
//! literal again.

use tracing::debug;

use super::path::ResolvedPath;
use super::rule::{ReplacementRule, RuleError, RuleTemplate};

/// The built-in rules for a bundled PHP runtime.
///
/// | # | Search                   | Replacement                         |
/// |---|--------------------------|-------------------------------------|
/// | 1 | `;extension=curl`        | `extension=curl`                    |
/// | 2 | `;extension=mbstring`    | `extension=mbstring`                |
/// | 3 | `;extension=openssl`     | `extension=openssl`                 |
/// | 4 | `;extension_dir = "ext"` | `extension_dir = "ext"`             |
/// | 5 | `;curl.cainfo =`         | `curl.cainfo = "{cacert}"`          |
/// | 6 | `;openssl.cafile =`      | `openssl.cafile = "{cacert}"`       |
pub fn php_default_templates() -> Vec<RuleTemplate> {
    vec![
        RuleTemplate::new(";extension=curl", "extension=curl"),
        RuleTemplate::new(";extension=mbstring", "extension=mbstring"),
        RuleTemplate::new(";extension=openssl", "extension=openssl"),
        RuleTemplate::new(";extension_dir = \"ext\"", "extension_dir = \"ext\""),
        RuleTemplate::new(";curl.cainfo =", "curl.cainfo = \"{cacert}\""),
        RuleTemplate::new(";openssl.cafile =", "openssl.cafile = \"{cacert}\""),
    ]
}

/// How many times one rule matched during a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub search: String,
    pub occurrences: usize,
}

/// Per-rule match counts, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    outcomes: Vec<RuleOutcome>,
}

impl PatchReport {
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// `true` when at least one rule matched.
    pub fn changed(&self) -> bool {
        self.outcomes.iter().any(|o| o.occurrences > 0)
    }

    pub fn total_replacements(&self) -> usize {
        self.outcomes.iter().map(|o| o.occurrences).sum()
    }

    /// Rules whose search literal was not found.
    pub fn unmatched(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.occurrences == 0)
    }
}

/// An ordered list of replacement rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ruleset {
    rules: Vec<ReplacementRule>,
}

impl Ruleset {
    pub fn new(rules: Vec<ReplacementRule>) -> Self {
        Self { rules }
    }

    /// Renders every template against `cacert`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] encountered; its index is the
    /// template's zero-based position.
    pub fn from_templates(templates: &[RuleTemplate], cacert: &ResolvedPath) -> Result<Self, RuleError> {
        let rules = templates
            .iter()
            .enumerate()
            .map(|(index, template)| template.render(index, cacert))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The built-in PHP ruleset with `cacert` interpolated.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in templates; the `Result` only mirrors
    /// [`Ruleset::from_templates`].
    pub fn php_defaults(cacert: &ResolvedPath) -> Result<Self, RuleError> {
        Self::from_templates(&php_default_templates(), cacert)
    }

    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies every rule in order and returns the patched text with a report.
    pub fn apply(&self, document: &str) -> (String, PatchReport) {
        let mut patched = document.to_string();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let occurrences = rule.apply(&mut patched);
            debug!(search = rule.search(), occurrences, "applied rule");
            outcomes.push(RuleOutcome {
                search: rule.search().to_string(),
                occurrences,
            });
        }

        (patched, PatchReport { outcomes })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
