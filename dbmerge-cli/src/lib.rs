//! Support library for the dbmerge CLI binary.
//!
//! Re-exports the CLI, logging and rendering modules so doctests and
//! integration tests can exercise the command pipeline without forking a
//! subprocess.

pub mod cli;
pub mod logging;
pub mod render;
