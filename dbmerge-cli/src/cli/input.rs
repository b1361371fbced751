//! Line-based point file ingestion.
//!
//! Each data line holds `x y` or `id x y`, separated by commas and/or
//! whitespace. Blank lines and `#` comments are skipped. Without an explicit
//! id, a point takes the zero-based index of its data line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use dbmerge_core::{Point, PointId};
use tracing::{Span, field, instrument};

use super::commands::CliError;

#[instrument(name = "cli.load_points", err, fields(path = field::Empty, points = field::Empty))]
pub(super) fn load_points(path: &Path) -> Result<Vec<Point>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let points = parse_points(BufReader::new(file), path)?;
    span.record("points", points.len());
    Ok(points)
}

pub(super) fn parse_points(reader: impl BufRead, path: &Path) -> Result<Vec<Point>, CliError> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = line.split('#').next().unwrap_or_default();
        let fields: Vec<&str> = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .collect();
        if fields.is_empty() {
            continue;
        }
        let fallback_id = u64::try_from(points.len()).map_err(|_| CliError::Parse {
            path: path.to_path_buf(),
            line: line_number,
            reason: "too many points".to_owned(),
        })?;
        let point = parse_fields(&fields, fallback_id).map_err(|reason| CliError::Parse {
            path: path.to_path_buf(),
            line: line_number,
            reason,
        })?;
        points.push(point);
    }
    Ok(points)
}

fn parse_fields(fields: &[&str], fallback_id: u64) -> Result<Point, String> {
    match fields {
        [x, y] => Ok(Point::new(
            PointId::new(fallback_id),
            parse_coordinate(x)?,
            parse_coordinate(y)?,
        )),
        [id, x, y] => {
            let id = id
                .parse::<u64>()
                .map_err(|err| format!("invalid id `{id}`: {err}"))?;
            Ok(Point::new(
                PointId::new(id),
                parse_coordinate(x)?,
                parse_coordinate(y)?,
            ))
        }
        other => Err(format!("expected 2 or 3 fields, found {}", other.len())),
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|err| format!("invalid coordinate `{raw}`: {err}"))
}
