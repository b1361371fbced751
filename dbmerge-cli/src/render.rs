//! Vector scatter plots of point sets and clustering results.
//!
//! Plots are written as standalone SVG documents built from `<rect>`,
//! `<path>` and `<text>` elements. No raster image is produced or embedded,
//! so callers that need PNG output must convert the files themselves.
//!
//! Both renderers draw onto a square canvas of [`CANVAS_PX`] pixels. Data
//! bounds are mapped onto the canvas with a fixed margin and the y axis
//! points up. A failed render affects only its own output file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use dbmerge_core::{Partition, Point, PointSet};
use thiserror::Error;
use tracing::{debug, instrument};

/// Width and height of the rendered canvas in pixels.
pub const CANVAS_PX: u32 = 512;
const MARGIN_PX: f64 = 24.0;
const MARKER_PX: f64 = 6.0;
const NOISE_COLOUR: &str = "#9e9e9e";
const CROSS_COLOUR: &str = "#d32f2f";

/// Errors raised while writing a plot.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output file could not be created.
    #[error("failed to create `{path}`: {source}")]
    Create {
        /// Requested output path.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing the plot body failed.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// Output path being written.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

/// Writes a plot of `partition` to `path`: one square marker per clustered
/// point, coloured per cluster, with noise in grey.
///
/// # Errors
/// Returns [`RenderError`] when the file cannot be created or written.
#[instrument(name = "render.clusters", err, skip(partition), fields(path = %path.display()))]
pub fn render_clusters(partition: &Partition, path: &Path) -> Result<(), RenderError> {
    write_to_path(path, |writer| write_clusters(partition, writer))
}

/// Writes a plot of `points` to `path`: a red cross per point labelled with
/// its position in the set.
///
/// # Errors
/// Returns [`RenderError`] when the file cannot be created or written.
#[instrument(name = "render.labelled", err, skip(points), fields(path = %path.display()))]
pub fn render_labelled(points: &PointSet, path: &Path) -> Result<(), RenderError> {
    write_to_path(path, |writer| write_labelled(points, writer))
}

fn write_to_path(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), RenderError> {
    let file = File::create(path).map_err(|source| RenderError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    body(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("plot written");
    Ok(())
}

/// Writes the cluster plot of `partition` as an SVG document.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// # use dbmerge_cli::render::write_clusters;
/// # use dbmerge_core::{DbmergeBuilder, PointSet};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let points = PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])?;
/// let partition = DbmergeBuilder::new().with_min_pts(2).build()?.run(&points)?;
/// let mut svg = Vec::new();
/// write_clusters(&partition, &mut svg)?;
/// assert_eq!(String::from_utf8(svg)?.matches("<rect x=").count(), 3);
/// # Ok(())
/// # }
/// ```
pub fn write_clusters(partition: &Partition, mut writer: impl Write) -> io::Result<()> {
    let all = partition
        .clusters()
        .iter()
        .flatten()
        .chain(partition.noise());
    let projection = Projection::fit(all);
    write_header(&mut writer, "clusters")?;
    for (index, cluster) in partition.clusters().iter().enumerate() {
        let colour = cluster_colour(index);
        for point in cluster {
            write_square(&mut writer, &projection, point, &colour)?;
        }
    }
    for point in partition.noise() {
        write_square(&mut writer, &projection, point, NOISE_COLOUR)?;
    }
    writeln!(writer, "</svg>")
}

/// Writes the labelled scatter plot of `points` as an SVG document.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn write_labelled(points: &PointSet, mut writer: impl Write) -> io::Result<()> {
    let projection = Projection::fit(points.iter());
    write_header(&mut writer, "points")?;
    for (index, point) in points.iter().enumerate() {
        let (cx, cy) = projection.to_canvas(point);
        let half = MARKER_PX / 2.0;
        writeln!(
            writer,
            r#"<path d="M{:.2} {:.2}L{:.2} {:.2}M{:.2} {:.2}L{:.2} {:.2}" stroke="{CROSS_COLOUR}" stroke-width="1.5"/>"#,
            cx - half,
            cy - half,
            cx + half,
            cy + half,
            cx - half,
            cy + half,
            cx + half,
            cy - half,
        )?;
        writeln!(
            writer,
            r#"<text x="{:.2}" y="{:.2}" font-size="10" font-family="sans-serif">{index}</text>"#,
            cx + half + 1.0,
            cy - half - 1.0,
        )?;
    }
    writeln!(writer, "</svg>")
}

fn write_header(writer: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_PX}" height="{CANVAS_PX}" viewBox="0 0 {CANVAS_PX} {CANVAS_PX}">"#
    )?;
    writeln!(writer, "<title>{title}</title>")?;
    writeln!(
        writer,
        r#"<rect width="{CANVAS_PX}" height="{CANVAS_PX}" fill="white"/>"#
    )
}

fn write_square(
    writer: &mut impl Write,
    projection: &Projection,
    point: &Point,
    colour: &str,
) -> io::Result<()> {
    let (cx, cy) = projection.to_canvas(point);
    let half = MARKER_PX / 2.0;
    writeln!(
        writer,
        r#"<rect x="{:.2}" y="{:.2}" width="{MARKER_PX}" height="{MARKER_PX}" fill="{colour}"/>"#,
        cx - half,
        cy - half,
    )
}

/// Deterministic colour for the cluster at `index`, spaced around the hue
/// wheel by the golden angle.
fn cluster_colour(index: usize) -> String {
    let hue = index.wrapping_mul(137) % 360;
    format!("hsl({hue}, 65%, 45%)")
}

/// Maps data coordinates onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    min_x: f64,
    min_y: f64,
    scale: f64,
}

impl Projection {
    fn fit<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for point in points {
            min_x = min_x.min(point.x());
            min_y = min_y.min(point.y());
            max_x = max_x.max(point.x());
            max_y = max_y.max(point.y());
        }
        if !min_x.is_finite() {
            return Self {
                min_x: 0.0,
                min_y: 0.0,
                scale: 1.0,
            };
        }
        // One scale for both axes keeps distances undistorted.
        let span = (max_x - min_x).max(max_y - min_y);
        let drawable = f64::from(CANVAS_PX) - 2.0 * MARGIN_PX;
        let scale = if span > 0.0 { drawable / span } else { 1.0 };
        Self {
            min_x,
            min_y,
            scale,
        }
    }

    fn to_canvas(&self, point: &Point) -> (f64, f64) {
        let x = MARGIN_PX + (point.x() - self.min_x) * self.scale;
        let y = f64::from(CANVAS_PX) - MARGIN_PX - (point.y() - self.min_y) * self.scale;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use dbmerge_core::{DbmergeBuilder, PointId};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn points() -> PointSet {
        PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (10.0, 10.0)])
            .expect("valid set")
    }

    #[fixture]
    fn partition(points: PointSet) -> Partition {
        DbmergeBuilder::new()
            .with_eps(2.0)
            .with_min_pts(2)
            .build()
            .and_then(|dbmerge| dbmerge.run(&points))
            .expect("clustering succeeds")
    }

    #[rstest]
    fn projection_maps_bounds_to_margins(points: PointSet) {
        let projection = Projection::fit(points.iter());
        let far = f64::from(CANVAS_PX) - MARGIN_PX;
        let close = |(ax, ay): (f64, f64), (bx, by): (f64, f64)| {
            (ax - bx).abs() < 1e-9 && (ay - by).abs() < 1e-9
        };
        assert!(close(
            projection.to_canvas(&Point::new(PointId::new(0), 0.0, 0.0)),
            (MARGIN_PX, far),
        ));
        assert!(close(
            projection.to_canvas(&Point::new(PointId::new(3), 10.0, 10.0)),
            (far, MARGIN_PX),
        ));
    }

    #[test]
    fn projection_of_single_point_is_finite() {
        let set = PointSet::from_coordinates([(5.0, 5.0)]).expect("valid set");
        let projection = Projection::fit(set.iter());
        let (x, y) = projection.to_canvas(&set.points()[0]);
        assert!(x.is_finite() && y.is_finite());
    }

    #[rstest]
    fn cluster_plot_colours_noise_separately(partition: Partition) {
        let mut buffer = Vec::new();
        write_clusters(&partition, &mut buffer).expect("write to vec");
        let svg = String::from_utf8(buffer).expect("utf-8 output");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(&cluster_colour(0)).count(), 3);
        assert_eq!(svg.matches(NOISE_COLOUR).count(), 1);
    }

    #[rstest]
    fn plots_are_vector_documents(partition: Partition, points: PointSet) {
        let mut clusters = Vec::new();
        let mut labelled = Vec::new();
        write_clusters(&partition, &mut clusters).expect("write to vec");
        write_labelled(&points, &mut labelled).expect("write to vec");
        for buffer in [clusters, labelled] {
            let svg = String::from_utf8(buffer).expect("utf-8 output");
            assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
            assert!(!svg.contains("<image"));
            assert!(!svg.contains("data:image"));
        }
    }

    #[rstest]
    fn labelled_plot_marks_every_point(points: PointSet) {
        let mut buffer = Vec::new();
        write_labelled(&points, &mut buffer).expect("write to vec");
        let svg = String::from_utf8(buffer).expect("utf-8 output");
        assert_eq!(svg.matches(CROSS_COLOUR).count(), 4);
        for label in ["0", "1", "2", "3"] {
            assert!(svg.contains(&format!(">{label}</text>")));
        }
    }

    #[test]
    fn cluster_colours_are_distinct_for_small_counts() {
        let colours: std::collections::HashSet<_> = (0..32).map(cluster_colour).collect();
        assert_eq!(colours.len(), 32);
    }

    #[rstest]
    fn render_writes_files(partition: Partition, points: PointSet) {
        let dir = TempDir::new().expect("temp dir");
        let clusters = dir.path().join("clusters.svg");
        let labelled = dir.path().join("labelled.svg");
        render_clusters(&partition, &clusters).expect("cluster plot");
        render_labelled(&points, &labelled).expect("labelled plot");
        assert!(std::fs::metadata(&clusters).is_ok_and(|meta| meta.len() > 0));
        assert!(std::fs::metadata(&labelled).is_ok_and(|meta| meta.len() > 0));
    }

    #[rstest]
    fn render_reports_missing_directory(points: PointSet) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("missing").join("plot.svg");
        let err = render_labelled(&points, &path).expect_err("directory does not exist");
        assert!(matches!(err, RenderError::Create { path: reported, .. } if reported == path));
    }
}
