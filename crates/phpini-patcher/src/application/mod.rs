//! Application layer use cases.
//!
//! Use cases here orchestrate the `phpini-core` domain and talk to the outside
//! world only through the [`patch_config::DocumentStore`] trait, so they can be
//! tested against a mock without touching the disk.
//!
//! - **`patch_config`** – read the target document, apply the ruleset, write
//!   it back (or not, for a dry run), and summarise what happened.

pub mod patch_config;
