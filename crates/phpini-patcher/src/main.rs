//! phpini-patcher entry point.
//!
//! Enables the bundled PHP runtime's `curl`, `mbstring` and `openssl`
//! extensions and points `curl.cainfo` / `openssl.cafile` at the bundled CA
//! certificate, by editing `php/php.ini` in place.
//!
//! # Usage
//!
//! ```text
//! phpini-patcher [OPTIONS]
//!
//! Options:
//!   --ini <PATH>      ini file to patch           [default: php/php.ini]
//!   --cacert <PATH>   CA bundle to reference      [default: php/cacert.pem]
//!   --profile <PATH>  TOML patch profile
//!   --dry-run         report without writing
//! ```
//!
//! Run without arguments from the directory that contains `php/`.
//!
//! # Environment variable overrides
//!
//! | Variable         | Flag        |
//! |------------------|-------------|
//! | `PHPINI_TARGET`  | `--ini`     |
//! | `PHPINI_CACERT`  | `--cacert`  |
//! | `PHPINI_PROFILE` | `--profile` |
//!
//! # Output
//!
//! Exactly one line on stdout: `php.ini updated successfully.` or
//! `Error updating php.ini: <reason>`.  Any failure exits with status 1.
//! Logs go to stderr and are filtered by `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use phpini_patcher::application::patch_config::{PatchConfigUseCase, PatchRequest, PatchSummary};
use phpini_patcher::infrastructure::storage::fs::FsDocumentStore;
use phpini_patcher::infrastructure::storage::profile::{
    load_profile, PatchProfile, DEFAULT_TARGET,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Enable bundled PHP extensions and configure the bundled CA certificate.
///
/// Path flags are optional so that a profile value is only overridden when
/// the flag (or its environment variable) is actually given.
#[derive(Debug, Parser)]
#[command(
    name = "phpini-patcher",
    about = "Enable bundled PHP extensions and point php.ini at the bundled CA certificate",
    version
)]
struct Cli {
    /// The ini file to patch [default: php/php.ini].
    #[arg(long, env = "PHPINI_TARGET")]
    ini: Option<PathBuf>,

    /// The CA bundle whose absolute path is written into the ini file
    /// [default: php/cacert.pem].
    #[arg(long, env = "PHPINI_CACERT")]
    cacert: Option<PathBuf>,

    /// TOML patch profile overriding the target, certificate and rules.
    #[arg(long, env = "PHPINI_PROFILE")]
    profile: Option<PathBuf>,

    /// Apply the rules in memory and report, without writing the file.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Name used in the result line before the real target is known.
    fn fallback_label(&self) -> String {
        display_name(self.ini.as_deref().unwrap_or(Path::new(DEFAULT_TARGET)))
    }

    /// Merges CLI flags over the profile (or the built-in defaults).
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be loaded or the working
    /// directory cannot be determined.
    fn into_request(self) -> anyhow::Result<PatchRequest> {
        let profile = match &self.profile {
            Some(path) => load_profile(path)?,
            None => PatchProfile::default(),
        };
        let base_dir =
            std::env::current_dir().context("could not determine the working directory")?;

        Ok(profile
            .with_overrides(self.ini, self.cacert)
            .into_request(base_dir, self.dry_run))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the result line.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let fallback = cli.fallback_label();

    let request = match cli.into_request() {
        Ok(request) => request,
        Err(e) => return report_failure(&fallback, &e),
    };
    let label = display_name(&request.target);
    info!(
        path = %request.target.display(),
        dry_run = request.dry_run,
        "patching configuration"
    );

    let use_case = PatchConfigUseCase::new(Arc::new(FsDocumentStore::new()));
    match use_case.execute(&request) {
        Ok(summary) => {
            println!("{}", success_line(&label, &summary));
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&label, &anyhow::Error::new(e)),
    }
}

fn report_failure(label: &str, err: &anyhow::Error) -> ExitCode {
    debug!(error = ?err, "patch failed");
    println!("Error updating {label}: {err:#}");
    ExitCode::FAILURE
}

fn success_line(label: &str, summary: &PatchSummary) -> String {
    if summary.written {
        format!("{label} updated successfully.")
    } else if summary.report.changed() {
        format!(
            "{label} would be updated ({} replacements).",
            summary.report.total_replacements()
        )
    } else {
        format!("{label} is already up to date.")
    }
}

/// `php/php.ini` → `php.ini`.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
