//! Text and JSON reports for [`ExecutionSummary`] values.

use std::io::{self, Write};

use dbmerge_core::Point;
use serde::Serialize;

use super::commands::{ExecutionSummary, OutputFormat};

/// Renders `summary` to `writer` in the format it was requested with.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, writer: impl Write) -> io::Result<()> {
    match summary.format {
        OutputFormat::Text => render_text(summary, writer),
        OutputFormat::Json => render_json(summary, writer),
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use dbmerge_cli::cli::{EpsSource, ExecutionSummary, OutputFormat, render_text};
/// # use dbmerge_core::{DbmergeBuilder, PointSet};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let points = PointSet::from_coordinates([(0.0, 0.0), (0.5, 0.0), (9.0, 9.0)])?;
/// let dbmerge = DbmergeBuilder::new().with_min_pts(2).build()?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     format: OutputFormat::Text,
///     eps: dbmerge.eps(),
///     eps_source: EpsSource::Flag,
///     min_pts: dbmerge.min_pts(),
///     hints: None,
///     point_count: points.len(),
///     partition: dbmerge.run(&points)?,
/// };
/// let mut buffer = Vec::new();
/// render_text(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("cluster 0: 0 1\n"));
/// assert!(text.contains("noise: 2\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_text(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let partition = &summary.partition;
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "points: {}", summary.point_count)?;
    writeln!(
        writer,
        "eps: {:.6} ({})",
        summary.eps,
        summary.eps_source.as_str()
    )?;
    if let Some(hints) = &summary.hints {
        writeln!(
            writer,
            "median pairwise distance: {:.6}",
            hints.median_pairwise
        )?;
        writeln!(
            writer,
            "median nearest-neighbour distance: {:.6}",
            hints.median_nearest_neighbour
        )?;
    }
    writeln!(writer, "min_pts: {}", summary.min_pts)?;
    writeln!(writer, "seeded clusters: {}", partition.seeded_clusters())?;
    writeln!(writer, "merge passes: {}", partition.merge_passes())?;
    writeln!(writer, "clusters: {}", partition.cluster_count())?;
    for (index, cluster) in partition.clusters().iter().enumerate() {
        writeln!(writer, "cluster {index}: {}", join_ids(cluster))?;
    }
    if partition.noise().is_empty() {
        writeln!(writer, "noise: none")?;
    } else {
        writeln!(writer, "noise: {}", join_ids(partition.noise()))?;
    }
    writeln!(writer, "assigned: {}", partition.assigned_count())?;
    writeln!(writer, "unassigned: {}", partition.noise_count())?;
    Ok(())
}

fn join_ids(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| point.id().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    data_source: &'a str,
    points: usize,
    eps: f64,
    eps_source: &'static str,
    min_pts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    median_pairwise_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    median_nearest_neighbour_distance: Option<f64>,
    seeded_clusters: usize,
    merge_passes: usize,
    clusters: Vec<Vec<u64>>,
    noise: Vec<u64>,
    assigned: usize,
    unassigned: usize,
}

impl<'a> From<&'a ExecutionSummary> for JsonReport<'a> {
    fn from(summary: &'a ExecutionSummary) -> Self {
        let partition = &summary.partition;
        let ids = |points: &[Point]| -> Vec<u64> {
            points.iter().map(|point| point.id().get()).collect()
        };
        Self {
            data_source: &summary.data_source,
            points: summary.point_count,
            eps: summary.eps.get(),
            eps_source: summary.eps_source.as_str(),
            min_pts: summary.min_pts,
            median_pairwise_distance: summary.hints.map(|hints| hints.median_pairwise),
            median_nearest_neighbour_distance: summary
                .hints
                .map(|hints| hints.median_nearest_neighbour),
            seeded_clusters: partition.seeded_clusters(),
            merge_passes: partition.merge_passes(),
            clusters: partition
                .clusters()
                .iter()
                .map(|cluster| ids(cluster))
                .collect(),
            noise: ids(partition.noise()),
            assigned: partition.assigned_count(),
            unassigned: partition.noise_count(),
        }
    }
}

/// Renders `summary` to `writer` as a pretty-printed JSON document.
///
/// # Errors
/// Returns [`io::Error`] if serialisation or writing fails.
pub fn render_json(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, &JsonReport::from(summary))?;
    writeln!(writer)
}
