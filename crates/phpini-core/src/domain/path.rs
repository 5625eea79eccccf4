//! Certificate path resolution.
//!
//! `php.ini` wants an absolute path written with forward slashes, even on
//! Windows (`C:/app/php/cacert.pem`).  [`ResolvedPath::resolve`] produces
//! exactly that from a possibly-relative path and a base directory.
//!
//! # Lexical, not canonical
//!
//! Resolution never touches the file system: `.` components are dropped and
//! `..` pops the previous component, but symlinks are not followed and the
//! file does not need to exist yet.  This matters on first-time setup, where
//! the certificate may be copied into place after the ini file is patched.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Error type for certificate path resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A relative path was given together with a relative base directory.
    #[error("base directory {0:?} is not absolute")]
    RelativeBase(PathBuf),

    /// The resolved path cannot be written into a UTF-8 text file.
    #[error("path {0:?} is not valid UTF-8")]
    NonUtf8(PathBuf),
}

/// An absolute, forward-slash certificate path ready to be written into
/// `php.ini`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    /// Resolves `path` against `base` and normalises separators to `/`.
    ///
    /// `base` is only consulted when `path` is relative; callers normally
    /// pass the process working directory.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::RelativeBase`] if `path` is relative and `base`
    /// is not absolute, or [`PathError::NonUtf8`] if the result is not UTF-8.
    pub fn resolve(base: &Path, path: &Path) -> Result<Self, PathError> {
        let absolute = absolutize(base, path)?;
        let text = absolute
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(absolute.clone()))?;
        Ok(Self(to_forward_slashes(text)))
    }

    /// Returns the path text, e.g. `/opt/app/php/cacert.pem`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Joins `path` onto `base` when relative and normalises the result lexically.
///
/// # Errors
///
/// Returns [`PathError::RelativeBase`] when a relative `path` would be joined
/// onto a relative `base`.
pub fn absolutize(base: &Path, path: &Path) -> Result<PathBuf, PathError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        if !base.is_absolute() {
            return Err(PathError::RelativeBase(base.to_path_buf()));
        }
        base.join(path)
    };
    Ok(normalize_lexically(&joined))
}

/// Replaces every `\` with `/`.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            // Popping at the root is a no-op, matching `/..` == `/`.
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
