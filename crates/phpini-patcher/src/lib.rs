//! phpini-patcher library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does phpini-patcher do? (for beginners)
//!
//! Portable PHP distributions ship a `php.ini` with most extensions disabled
//! and no CA bundle configured, so `curl` and `openssl` calls fail TLS
//! verification.  This tool runs once after unpacking such a distribution:
//!
//! 1. Resolves `php/cacert.pem` to an absolute, forward-slash path.
//! 2. Reads `php/php.ini` fully into memory.
//! 3. Applies an ordered list of literal find-and-replace rules that remove
//!    the leading `;` from the wanted directives and fill in the CA path.
//! 4. Writes the document back and prints one result line.
//!
//! Running it again is harmless: the disabled forms are gone, so nothing
//! matches the second time.

/// Application layer: the patch use case and its storage port.
pub mod application;

/// Infrastructure layer: file-system storage and patch profiles.
pub mod infrastructure;
