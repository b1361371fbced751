//! Shared test utilities used across dbmerge crates.
//!
//! Nothing here depends on `dbmerge-core`, so the core crate can use these
//! helpers from its own unit tests without pulling in a second copy of
//! itself.

pub mod fixtures;
pub mod proptest_profile;
pub mod tracing;
