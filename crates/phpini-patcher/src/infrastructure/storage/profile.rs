//! TOML patch profiles.
//!
//! A profile lets a distribution ship a different ini layout or extra
//! extensions without rebuilding the tool.  Every field is optional; a missing
//! field keeps the built-in default, so an empty file behaves exactly like
//! running without `--profile`.
//!
//! ```toml
//! target = "runtime/php/php.ini"
//! certificate = "runtime/php/extras/ssl/cacert.pem"
//!
//! [[rules]]
//! search = ";extension=curl"
//! replace = "extension=curl"
//!
//! [[rules]]
//! search = ";curl.cainfo ="
//! replace = 'curl.cainfo = "{cacert}"'
//! ```
//!
//! # Precedence
//!
//! CLI flag (or its `PHPINI_*` environment variable) > profile > built-in
//! default.  Relative paths are resolved against the working directory, not
//! the profile's directory.
//!
//! # `rules` replaces, it does not extend
//!
//! A `[[rules]]` list replaces the six default rules entirely.  Copy the
//! defaults into the profile if they are still wanted.

use std::io;
use std::path::{Path, PathBuf};

use phpini_core::{php_default_templates, RuleTemplate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::patch_config::PatchRequest;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_TARGET: &str = "php/php.ini";

/// Default companion certificate, relative to the working directory.
pub const DEFAULT_CERTIFICATE: &str = "php/cacert.pem";

/// Error type for profile loading.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("could not read profile {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse profile {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for one patch run, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatchProfile {
    /// The ini file to edit.
    #[serde(default = "default_target")]
    pub target: PathBuf,
    /// The CA bundle whose absolute path is injected as `{cacert}`.
    #[serde(default = "default_certificate")]
    pub certificate: PathBuf,
    /// Rules in application order.
    #[serde(default = "php_default_templates")]
    pub rules: Vec<RuleTemplate>,
}

fn default_target() -> PathBuf {
    PathBuf::from(DEFAULT_TARGET)
}

fn default_certificate() -> PathBuf {
    PathBuf::from(DEFAULT_CERTIFICATE)
}

impl Default for PatchProfile {
    fn default() -> Self {
        Self {
            target: default_target(),
            certificate: default_certificate(),
            rules: php_default_templates(),
        }
    }
}

impl PatchProfile {
    /// Applies CLI overrides on top of this profile.
    pub fn with_overrides(mut self, target: Option<PathBuf>, certificate: Option<PathBuf>) -> Self {
        if let Some(target) = target {
            self.target = target;
        }
        if let Some(certificate) = certificate {
            self.certificate = certificate;
        }
        self
    }

    /// Builds the use-case request; `base_dir` is normally the cwd.
    pub fn into_request(self, base_dir: PathBuf, dry_run: bool) -> PatchRequest {
        PatchRequest {
            target: self.target,
            certificate: self.certificate,
            base_dir,
            templates: self.rules,
            dry_run,
        }
    }
}

/// Loads a profile from `path`.
///
/// Unlike the built-in defaults, an explicitly named profile must exist.
///
/// # Errors
///
/// Returns [`ProfileError::Io`] if the file cannot be read and
/// [`ProfileError::Parse`] if it is not a valid profile.
pub fn load_profile(path: &Path) -> Result<PatchProfile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_default_profile_targets_bundled_php() {
        let profile = PatchProfile::default();
        assert_eq!(profile.target, PathBuf::from("php/php.ini"));
        assert_eq!(profile.certificate, PathBuf::from("php/cacert.pem"));
        assert_eq!(profile.rules, php_default_templates());
    }

    #[test]
    fn test_empty_toml_equals_default_profile() {
        let profile: PatchProfile = toml::from_str("").expect("deserialize empty");
        assert_eq!(profile, PatchProfile::default());
    }

    #[test]
    fn test_partial_toml_keeps_default_rules() {
        // Arrange
        let text = r#"target = "runtime/php.ini""#;

        // Act
        let profile: PatchProfile = toml::from_str(text).expect("deserialize partial");

        // Assert
        assert_eq!(profile.target, PathBuf::from("runtime/php.ini"));
        assert_eq!(profile.certificate, PathBuf::from(DEFAULT_CERTIFICATE));
        assert_eq!(profile.rules.len(), 6);
    }

    #[test]
    fn test_rules_list_replaces_defaults() {
        // Arrange
        let text = r#"
[[rules]]
search = ";extension=gd"
replace = "extension=gd"
"#;

        // Act
        let profile: PatchProfile = toml::from_str(text).expect("deserialize rules");

        // Assert
        assert_eq!(
            profile.rules,
            vec![RuleTemplate::new(";extension=gd", "extension=gd")]
        );
    }

    #[test]
    fn test_rule_missing_replace_is_parse_error() {
        let text = r#"
[[rules]]
search = ";extension=gd"
"#;
        let result: Result<PatchProfile, toml::de::Error> = toml::from_str(text);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_win_over_profile_values() {
        // Arrange
        let profile = PatchProfile {
            target: PathBuf::from("from/profile.ini"),
            certificate: PathBuf::from("from/profile.pem"),
            rules: Vec::new(),
        };

        // Act
        let merged = profile.with_overrides(Some(PathBuf::from("cli.ini")), None);

        // Assert
        assert_eq!(merged.target, PathBuf::from("cli.ini"));
        assert_eq!(merged.certificate, PathBuf::from("from/profile.pem"));
    }

    #[test]
    fn test_into_request_carries_every_field() {
        let base = std::env::current_dir().unwrap();
        let request = PatchProfile::default().into_request(base.clone(), true);

        assert_eq!(request.target, PathBuf::from(DEFAULT_TARGET));
        assert_eq!(request.certificate, PathBuf::from(DEFAULT_CERTIFICATE));
        assert_eq!(request.base_dir, base);
        assert_eq!(request.templates.len(), 6);
        assert!(request.dry_run);
    }

    #[test]
    fn test_load_profile_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("phpini_missing_{}.toml", Uuid::new_v4()));
        let err = load_profile(&path).unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
    }

    #[test]
    fn test_load_profile_reports_parse_error_with_path() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("phpini_profile_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let err = load_profile(&path).unwrap_err();

        // Assert
        assert!(matches!(err, ProfileError::Parse { .. }));
        assert!(err.to_string().contains("profile.toml"));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_profile_reads_file_from_disk() {
        let dir = std::env::temp_dir().join(format!("phpini_profile_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.toml");
        std::fs::write(&path, "certificate = \"certs/ca.pem\"\n").unwrap();

        let profile = load_profile(&path).unwrap();

        assert_eq!(profile.certificate, PathBuf::from("certs/ca.pem"));
        assert_eq!(profile.target, PathBuf::from(DEFAULT_TARGET));
        std::fs::remove_dir_all(&dir).ok();
    }
}
