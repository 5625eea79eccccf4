//! # phpini-core
//!
//! Pure domain logic for patching a `php.ini` file: replacement rules, rule
//! templates with a certificate-path placeholder, the default ruleset, and
//! lexical resolution of the companion certificate path.
//!
//! This crate performs no file-system I/O.  Reading and writing the
//! configuration document is the job of the `phpini-patcher` crate; this crate
//! only turns one string into another and reports what changed.
//!
//! # How patching works (for beginners)
//!
//! A bundled PHP runtime ships a `php.ini` where the useful extensions are
//! commented out with a leading `;`.  Enabling them is a matter of deleting
//! that `;`.  Two settings additionally need the absolute path of the bundled
//! CA certificate file so PHP can verify TLS peers.
//!
//! - **`domain::path`** – turns `php/cacert.pem` into an absolute,
//!   forward-slash path such as `/opt/app/php/cacert.pem`.
//! - **`domain::rule`** – a single literal find-and-replace pair, plus the
//!   template form where the replacement may contain `{cacert}`.
//! - **`domain::ruleset`** – the ordered list of rules applied to the whole
//!   document, and the report of how many times each one matched.

pub mod domain;

pub use domain::path::{PathError, ResolvedPath};
pub use domain::rule::{ReplacementRule, RuleError, RuleTemplate, CACERT_PLACEHOLDER};
pub use domain::ruleset::{php_default_templates, PatchReport, RuleOutcome, Ruleset};
