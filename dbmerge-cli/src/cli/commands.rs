//! Command implementations and argument parsing for the dbmerge CLI.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dbmerge_core::{
    DEFAULT_EPS, DEFAULT_MIN_PTS, DbmergeBuilder, DbmergeError, Eps, ParameterHints, Partition,
    PointSet, SquareBlobConfig, SyntheticError,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::{demo::demo_points, input::load_points};
use crate::render::{RenderError, render_clusters, render_labelled};

const DEFAULT_SYNTHETIC_POINTS: usize = 400;
const DEFAULT_SYNTHETIC_BLOBS: usize = 3;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dbmerge",
    about = "Cluster 2-D points with DBSCAN and merge overlapping clusters."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a point set and report the merged clusters.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Neighbourhood radius. Derived from nearest-neighbour distances when
    /// omitted.
    #[arg(long)]
    pub eps: Option<f64>,

    /// Density threshold, counting the point itself.
    #[arg(
        long = "min-pts",
        default_value_t = DEFAULT_MIN_PTS,
        value_parser = clap::value_parser!(usize),
    )]
    pub min_pts: usize,

    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write an SVG plot of the merged clusters to this path.
    #[arg(long = "clusters-svg")]
    pub clusters_svg: Option<PathBuf>,

    /// Write an SVG plot of the input points, labelled by index, to this path.
    #[arg(long = "labels-svg")]
    pub labels_svg: Option<PathBuf>,

    /// Point source.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Point sources supported by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read points from a text file with one `x y` or `id x y` per line.
    File(FileArgs),
    /// Use the built-in forty-point sample set.
    Demo,
    /// Generate seeded square blobs.
    Synthetic(SyntheticArgs),
}

/// Point file arguments.
#[derive(Debug, Args, Clone)]
pub struct FileArgs {
    /// Path to a UTF-8 point file.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Synthetic generator arguments.
#[derive(Debug, Args, Clone)]
pub struct SyntheticArgs {
    /// Total number of points.
    #[arg(long, default_value_t = DEFAULT_SYNTHETIC_POINTS)]
    pub points: usize,

    /// Number of square blobs.
    #[arg(long, default_value_t = DEFAULT_SYNTHETIC_BLOBS)]
    pub blobs: usize,

    /// Generator seed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// Report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// A single JSON document.
    Json,
}

/// Where the radius used for a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpsSource {
    /// Supplied with `--eps`.
    Flag,
    /// Derived with [`dbmerge_core::suggest_eps`].
    Heuristic,
    /// Too few points for the heuristic; the library default was used.
    Default,
}

impl EpsSource {
    /// Stable lowercase label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Heuristic => "heuristic",
            Self::Default => "default",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A point file line could not be parsed.
    #[error("{path}:{line}: {reason}")]
    Parse {
        /// Point file being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
    /// Core validation or clustering failed.
    #[error(transparent)]
    Core(#[from] DbmergeError),
    /// Synthetic generation failed.
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),
    /// Writing a plot failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the point source.
    pub data_source: String,
    /// Requested report format.
    pub format: OutputFormat,
    /// Radius used for clustering.
    pub eps: Eps,
    /// Origin of [`Self::eps`].
    pub eps_source: EpsSource,
    /// Density threshold used for clustering.
    pub min_pts: usize,
    /// Heuristic statistics, present when the radius was derived.
    pub hints: Option<ParameterHints>,
    /// Number of input points.
    pub point_count: usize,
    /// Merged clusters and noise.
    pub partition: Partition,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, clustering or rendering fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use dbmerge_cli::cli::{Cli, Command, FileArgs, OutputFormat, RunCommand, RunSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 0\n0 1\n1 0\n9 9\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         eps: Some(1.5),
///         min_pts: 3,
///         format: OutputFormat::Text,
///         clusters_svg: None,
///         labels_svg: None,
///         source: RunSource::File(FileArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.partition.cluster_count(), 1);
/// assert_eq!(summary.partition.noise_count(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(min_pts = command.min_pts, source = field::Empty, eps = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        eps,
        min_pts,
        format,
        clusters_svg,
        labels_svg,
        source,
    } = command;
    let explicit_eps = eps.map(Eps::new).transpose()?;

    let span = Span::current();
    span.record("source", field::display(source_label(&source)));
    let (data_source, points) = load_source(source)?;

    let (eps, eps_source, hints) = resolve_eps(explicit_eps, &points)?;
    span.record("eps", field::display(eps));
    let dbmerge = DbmergeBuilder::new()
        .with_eps(eps.get())
        .with_min_pts(min_pts)
        .build()?;
    let partition = dbmerge.run(&points)?;

    if let Some(path) = clusters_svg.as_deref() {
        render_clusters(&partition, path)?;
    }
    if let Some(path) = labels_svg.as_deref() {
        render_labelled(&points, path)?;
    }

    info!(
        data_source = data_source.as_str(),
        eps_source = eps_source.as_str(),
        clusters = partition.cluster_count(),
        noise = partition.noise_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source,
        format,
        eps,
        eps_source,
        min_pts,
        hints,
        point_count: points.len(),
        partition,
    })
}

fn source_label(source: &RunSource) -> &'static str {
    match source {
        RunSource::File(_) => "file",
        RunSource::Demo => "demo",
        RunSource::Synthetic(_) => "synthetic",
    }
}

fn load_source(source: RunSource) -> Result<(String, PointSet), CliError> {
    match source {
        RunSource::File(FileArgs { path, name }) => {
            let chosen_name = derive_data_source_name(&path, name.as_deref());
            let points = PointSet::try_new(load_points(&path)?)?;
            Ok((chosen_name, points))
        }
        RunSource::Demo => Ok(("demo".to_owned(), PointSet::try_new(demo_points())?)),
        RunSource::Synthetic(SyntheticArgs {
            points,
            blobs,
            seed,
        }) => {
            let config = SquareBlobConfig {
                point_count: points,
                blob_count: blobs,
                seed,
            };
            Ok((format!("synthetic-{seed}"), config.generate()?))
        }
    }
}

/// Picks the radius for a run: the explicit value if given, otherwise the
/// heuristic suggestion, otherwise the library default for sets too small
/// to measure. A heuristic radius that overflows is an error, not a reason
/// to fall back.
pub(super) fn resolve_eps(
    explicit: Option<Eps>,
    points: &PointSet,
) -> Result<(Eps, EpsSource, Option<ParameterHints>), CliError> {
    if let Some(eps) = explicit {
        return Ok((eps, EpsSource::Flag, None));
    }
    match ParameterHints::compute(points)? {
        Some(hints) => Ok((hints.eps, EpsSource::Heuristic, Some(hints))),
        None => Ok((Eps::new(DEFAULT_EPS)?, EpsSource::Default, None)),
    }
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}
