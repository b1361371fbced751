//! Canonical point sets shared by the test suites.
//!
//! Fixtures are plain `(id, x, y)` tuples so they can be fed to any crate's
//! point constructor.

/// Three close points and one far outlier.
pub const TRIANGLE_WITH_OUTLIER: [(u64, f64, f64); 4] = [
    (0, 0.0, 0.0),
    (1, 1.0, 0.0),
    (2, 0.0, 1.0),
    (3, 10.0, 10.0),
];

/// Two dense groups bridged by a border point that is not itself dense.
///
/// With `eps = 1.0` and `min_pts = 4`, expansion emits two clusters that
/// both contain point 3.
pub const BRIDGED_PAIR: [(u64, f64, f64); 7] = [
    (0, -0.6, 0.0),
    (1, -0.5, 0.0),
    (2, 0.0, 0.0),
    (3, 1.0, 0.0),
    (4, 2.0, 0.0),
    (5, 2.5, 0.0),
    (6, 2.6, 0.0),
];
