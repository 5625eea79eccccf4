//! Domain layer: the configuration document is plain text, so everything here
//! is string and path arithmetic with no I/O.

pub mod path;
pub mod rule;
pub mod ruleset;
