//! Command-line interface orchestration for dbmerge.
//!
//! The `run` command loads points from a file, the built-in demo set or a
//! seeded synthetic generator, clusters them, and reports the merged
//! clusters as text or JSON. Optional SVG plots can be written alongside.

mod commands;
mod demo;
mod input;
mod report;

pub use commands::{
    Cli, CliError, Command, EpsSource, ExecutionSummary, FileArgs, OutputFormat, RunCommand,
    RunSource, SyntheticArgs, run_cli,
};
pub use report::{render_json, render_summary, render_text};

#[cfg(test)]
mod test_helpers;
