//! PatchConfigUseCase: apply the ruleset to the target configuration file.
//!
//! The sequence is strictly read → transform → write with no locking, no
//! temporary file and no rollback.  A crash between truncate and write can
//! leave the file empty; that is accepted for a one-shot setup step.
//!
//! # Failure handling
//!
//! Every failure (bad certificate path, bad rule template, unreadable or
//! non-UTF-8 target, unwritable target) becomes a [`PatchError`].  The binary
//! renders all of them the same way, as a single line, without branching on
//! the variant.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use phpini_core::{PathError, PatchReport, ResolvedPath, RuleError, RuleTemplate, Ruleset};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for the patch use case.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("invalid certificate path")]
    CertificatePath(#[from] PathError),

    #[error("invalid replacement rule")]
    Rule(#[from] RuleError),

    /// Missing file, permission denied, or content that is not UTF-8.
    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Port for loading and saving the configuration document.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentStore: Send + Sync {
    /// Reads the whole document as UTF-8 text.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replaces the whole document with `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Everything one patch run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    /// The configuration file to edit.
    pub target: PathBuf,
    /// The companion certificate; may be relative to `base_dir`.
    pub certificate: PathBuf,
    /// Directory relative paths are resolved against (normally the cwd).
    pub base_dir: PathBuf,
    /// Rules in application order; `{cacert}` is interpolated.
    pub templates: Vec<RuleTemplate>,
    /// When set, the document is transformed but not written back.
    pub dry_run: bool,
}

/// Result of a successful patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSummary {
    pub target: PathBuf,
    pub cacert: ResolvedPath,
    pub report: PatchReport,
    /// `false` only for dry runs.
    pub written: bool,
}

/// The Patch Config use case.
pub struct PatchConfigUseCase {
    store: Arc<dyn DocumentStore>,
}

impl PatchConfigUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Runs one patch.
    ///
    /// The document is written back even when no rule matched, so a
    /// successful run always leaves the file freshly saved.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError`] for any path, rule, read or write failure.  No
    /// write is attempted if anything before it failed.
    pub fn execute(&self, request: &PatchRequest) -> Result<PatchSummary, PatchError> {
        let cacert = ResolvedPath::resolve(&request.base_dir, &request.certificate)?;
        debug!(%cacert, "resolved certificate path");

        let ruleset = Ruleset::from_templates(&request.templates, &cacert)?;

        let original = self
            .store
            .read(&request.target)
            .map_err(|source| PatchError::Read {
                path: request.target.clone(),
                source,
            })?;

        let (patched, report) = ruleset.apply(&original);
        for outcome in report.unmatched() {
            debug!(search = %outcome.search, "rule matched nothing");
        }
        info!(
            path = %request.target.display(),
            replacements = report.total_replacements(),
            rules = ruleset.len(),
            "applied ruleset"
        );

        if request.dry_run {
            return Ok(PatchSummary {
                target: request.target.clone(),
                cacert,
                report,
                written: false,
            });
        }

        self.store
            .write(&request.target, &patched)
            .map_err(|source| PatchError::Write {
                path: request.target.clone(),
                source,
            })?;

        Ok(PatchSummary {
            target: request.target.clone(),
            cacert,
            report,
            written: true,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
