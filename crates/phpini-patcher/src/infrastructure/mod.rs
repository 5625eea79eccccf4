//! Infrastructure layer.
//!
//! Contains OS-facing adapters: the file-system [`storage::fs::FsDocumentStore`]
//! and the TOML patch profile loader.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `phpini_core`, but MUST NOT be imported by the `application` layer.

pub mod storage;
