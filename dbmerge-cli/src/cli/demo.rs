//! Built-in forty-point sample set used by `dbmerge run demo`.
//!
//! Six groups on a 2000 × 2000 canvas: a compact clump top-left, a clump
//! bottom-right, a diagonal arc, two neighbouring clumps near the origin and
//! a small group on the left edge.

use dbmerge_core::{Point, PointId};

/// `(id, x, y)` rows of the demo set.
pub(super) const DEMO_POINTS: [(u64, f64, f64); 40] = [
    (0, 330.0, 1950.0),
    (1, 370.0, 2020.0),
    (2, 330.0, 1990.0),
    (3, 350.0, 2000.0),
    (4, 350.0, 2030.0),
    (5, 2040.0, 340.0),
    (6, 2050.0, 350.0),
    (7, 2020.0, 320.0),
    (8, 1960.0, 350.0),
    (9, 1200.0, 1800.0),
    (10, 1270.0, 1750.0),
    (11, 1340.0, 1730.0),
    (12, 1410.0, 1700.0),
    (13, 1494.0, 1680.0),
    (14, 1578.0, 1662.0),
    (15, 1600.0, 1640.0),
    (16, 1620.0, 1620.0),
    (17, 1640.0, 1600.0),
    (18, 1662.0, 1578.0),
    (19, 1680.0, 1494.0),
    (20, 1700.0, 1410.0),
    (21, 1730.0, 1340.0),
    (22, 1750.0, 1270.0),
    (23, 1800.0, 1200.0),
    (24, 300.0, 300.0),
    (25, 312.0, 290.0),
    (26, 302.0, 315.0),
    (27, 278.0, 255.0),
    (28, 700.0, 700.0),
    (29, 726.0, 702.0),
    (30, 666.0, 653.0),
    (31, 612.0, 623.0),
    (32, 400.0, 500.0),
    (33, 434.0, 561.0),
    (34, 322.0, 433.0),
    (35, 402.0, 441.0),
    (36, 355.0, 412.0),
    (37, 100.0, 700.0),
    (38, 32.0, 615.0),
    (39, 125.0, 670.0),
];

pub(super) fn demo_points() -> Vec<Point> {
    DEMO_POINTS
        .iter()
        .map(|&(id, x, y)| Point::new(PointId::new(id), x, y))
        .collect()
}
