//! Local-maximum selection in the accumulator.

use rayon::prelude::*;

use crate::Accumulator;

/// A line in Hough normal form: `x cos θ + y sin θ = r`.
///
/// `r` is the distance from the image origin (top-left corner) to the
/// closest point of the line, `theta` the angle of that normal from the
/// x axis, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParams {
    pub r: u32,
    pub theta: f64,
}

impl LineParams {
    pub fn new(r: u32, theta: f64) -> Self {
        Self { r, theta }
    }

    /// Line of accumulator cell `(r, a)` with bins `angle_step` radians apart.
    pub fn from_indices(r: usize, a: usize, angle_step: f64) -> Self {
        Self {
            r: r as u32,
            theta: a as f64 * angle_step,
        }
    }
}

/// An accepted accumulator cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub line: LineParams,
    pub angle_index: usize,
    pub votes: u32,
}

/// Tests cell `(r, a)` against its four diagonal neighbours
/// `(r±1, a±1)`. Neighbours outside the grid always pass.
///
/// Direct neighbours (same row or same column) are not consulted.
fn dominates_diagonals(acc: &Accumulator, r: usize, a: usize) -> bool {
    let votes = acc.get(r, a);
    let last_r = acc.r_steps() - 1;
    let last_a = acc.angle_steps() - 1;

    (r == 0 || a == 0 || votes >= acc.get(r - 1, a - 1))
        && (r == last_r || a == 0 || votes >= acc.get(r + 1, a - 1))
        && (r == 0 || a == last_a || votes >= acc.get(r - 1, a + 1))
        && (r == last_r || a == last_a || votes >= acc.get(r + 1, a + 1))
}

/// Selects accumulator cells that become lines.
///
/// A cell qualifies when its vote count is strictly greater than
/// `hough_threshold` and not smaller than any of its diagonal neighbours.
/// Adjacent qualifying cells are all reported; no merging of near-duplicate
/// lines is done.
///
/// Rows are tested in parallel. The output is ordered by distance bin, then
/// angle bin.
///
/// # Examples
///
/// ```rust
/// use hough_lines::{select_peaks, Accumulator};
///
/// let acc = Accumulator::from_raw(3, 3, vec![
///     0, 0, 0,
///     0, 5, 0,
///     0, 0, 0,
/// ]).unwrap();
/// let peaks = select_peaks(&acc, 2);
/// assert_eq!(peaks.len(), 1);
/// assert_eq!(peaks[0].line.r, 1);
/// assert_eq!(peaks[0].votes, 5);
/// ```
pub fn select_peaks(acc: &Accumulator, hough_threshold: i64) -> Vec<Peak> {
    let angle_step = acc.angle_step();

    (0..acc.r_steps())
        .into_par_iter()
        .flat_map_iter(move |r| {
            acc.row(r)
                .iter()
                .enumerate()
                .filter(move |&(a, &votes)| {
                    (votes as i64) > hough_threshold && dominates_diagonals(acc, r, a)
                })
                .map(move |(a, &votes)| Peak {
                    line: LineParams::from_indices(r, a, angle_step),
                    angle_index: a,
                    votes,
                })
        })
        .collect()
}
