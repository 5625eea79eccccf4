//! Storage infrastructure.
//!
//! - `fs` reads and writes the target ini document as UTF-8 text.
//! - `profile` loads an optional TOML patch profile that overrides the
//!   default target, certificate and rule list.

pub mod fs;
pub mod profile;
