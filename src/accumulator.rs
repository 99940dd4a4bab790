//! Hough vote accumulation in (distance, angle) space.

use std::f64::consts::{SQRT_2, TAU};

use rayon::prelude::*;

use crate::EdgeMask;

/// Number of distance bins for a `width` x `height` image.
///
/// `floor(max(width, height) * sqrt(2))`, enough to hold the distance from the
/// origin to any pixel including the far diagonal corner.
pub fn r_steps(width: u32, height: u32) -> usize {
    (width.max(height) as f64 * SQRT_2) as usize
}

/// Cosine and sine of every sampled angle, `θ = a * 2π / angle_steps`.
///
/// Computed once per run so the voting loop does no trigonometry.
#[derive(Debug, Clone)]
pub struct TrigTable {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl TrigTable {
    pub fn new(angle_steps: u32) -> Self {
        let step = TAU / angle_steps as f64;
        let (cos, sin) = (0..angle_steps)
            .map(|a| {
                let theta = a as f64 * step;
                (theta.cos(), theta.sin())
            })
            .unzip();
        Self { cos, sin }
    }

    pub fn len(&self) -> usize {
        self.cos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    pub fn cos(&self, a: usize) -> f64 {
        self.cos[a]
    }

    pub fn sin(&self, a: usize) -> f64 {
        self.sin[a]
    }

    /// Distance bin of `(x, y)` at angle index `a`, or `None` when the
    /// projection falls outside `[0, r_steps)`.
    ///
    /// The projection is truncated toward zero, so values in `(-1, 0)` land
    /// in bin 0.
    #[inline]
    pub fn project(&self, x: u32, y: u32, a: usize, r_steps: usize) -> Option<usize> {
        let r = (x as f64 * self.cos[a] + y as f64 * self.sin[a]) as i64;
        if r >= 0 && (r as usize) < r_steps {
            Some(r as usize)
        } else {
            None
        }
    }
}

/// Vote counts indexed by `(r, a)`, stored row-major by distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    r_steps: usize,
    angle_steps: usize,
    votes: Vec<u32>,
}

impl Accumulator {
    /// All-zero accumulator.
    pub fn zeros(r_steps: usize, angle_steps: usize) -> Self {
        Self {
            r_steps,
            angle_steps,
            votes: vec![0; r_steps * angle_steps],
        }
    }

    /// Wraps a row-major vote buffer. Returns `None` on a length mismatch.
    pub fn from_raw(r_steps: usize, angle_steps: usize, votes: Vec<u32>) -> Option<Self> {
        if votes.len() != r_steps * angle_steps {
            return None;
        }
        Some(Self {
            r_steps,
            angle_steps,
            votes,
        })
    }

    pub fn r_steps(&self) -> usize {
        self.r_steps
    }

    pub fn angle_steps(&self) -> usize {
        self.angle_steps
    }

    /// Angular distance between adjacent angle bins, in radians.
    pub fn angle_step(&self) -> f64 {
        TAU / self.angle_steps as f64
    }

    pub fn get(&self, r: usize, a: usize) -> u32 {
        assert!(r < self.r_steps && a < self.angle_steps, "cell out of bounds");
        self.votes[r * self.angle_steps + a]
    }

    /// Votes for one distance bin across all angles.
    pub fn row(&self, r: usize) -> &[u32] {
        let start = r * self.angle_steps;
        &self.votes[start..start + self.angle_steps]
    }

    pub fn as_raw(&self) -> &[u32] {
        &self.votes
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|&v| v as u64).sum()
    }

    pub fn max_votes(&self) -> u32 {
        self.votes.iter().copied().max().unwrap_or(0)
    }
}

fn vote_row(mask: &EdgeMask, y: u32, trig: &TrigTable, r_steps: usize, votes: &mut [u32]) {
    let angle_steps = trig.len();
    for (x, _) in mask.row(y).iter().enumerate().filter(|&(_, &e)| e) {
        for a in 0..angle_steps {
            if let Some(r) = trig.project(x as u32, y, a, r_steps) {
                votes[r * angle_steps + a] += 1;
            }
        }
    }
}

/// Smallest row batch handed to one rayon job, so that `fold` creates about
/// one partial buffer per worker thread instead of one per split.
fn rows_per_job(height: u32, threads: usize) -> usize {
    let threads = threads.max(1);
    ((height as usize + threads - 1) / threads).max(1)
}

/// Builds the Hough accumulator for an edge mask.
///
/// Every edge pixel votes once per sampled angle, in the bin
/// `r = trunc(x cos θ + y sin θ)`. Votes outside `[0, r_steps)` are dropped.
///
/// Mask rows are split into one batch per rayon worker, each voting into a
/// private buffer; the buffers are then summed. The result is identical to
/// [`accumulate_sequential`].
///
/// # Examples
///
/// ```rust
/// use hough_lines::{accumulate, EdgeMask};
///
/// let mask = EdgeMask::from_fn(10, 10, |x, y| x == 5 && y == 5);
/// let acc = accumulate(&mask, 4);
/// assert_eq!(acc.r_steps(), 14);
/// assert_eq!(acc.get(5, 0), 1);
/// ```
pub fn accumulate(mask: &EdgeMask, angle_steps: u32) -> Accumulator {
    let (width, height) = mask.dimensions();
    let r_steps = r_steps(width, height);
    let trig = TrigTable::new(angle_steps);
    let len = r_steps * trig.len();
    let min_len = rows_per_job(height, rayon::current_num_threads());

    let votes = (0..height)
        .into_par_iter()
        .with_min_len(min_len)
        .fold(
            || vec![0u32; len],
            |mut votes, y| {
                vote_row(mask, y, &trig, r_steps, &mut votes);
                votes
            },
        )
        .reduce(
            || vec![0u32; len],
            |mut acc, partial| {
                for (a, b) in acc.iter_mut().zip(partial) {
                    *a += b;
                }
                acc
            },
        );

    Accumulator {
        r_steps,
        angle_steps: trig.len(),
        votes,
    }
}

/// Single-threaded reference for [`accumulate`].
pub fn accumulate_sequential(mask: &EdgeMask, angle_steps: u32) -> Accumulator {
    let (width, height) = mask.dimensions();
    let r_steps = r_steps(width, height);
    let trig = TrigTable::new(angle_steps);
    let mut acc = Accumulator::zeros(r_steps, trig.len());
    for y in 0..height {
        vote_row(mask, y, &trig, r_steps, &mut acc.votes);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_steps_covers_diagonal() {
        assert_eq!(r_steps(10, 10), 14);
        assert_eq!(r_steps(100, 40), 141);
        assert_eq!(r_steps(0, 0), 0);
        assert_eq!(r_steps(1, 1), 1);
    }

    #[test]
    fn trig_table_samples_full_turn() {
        let trig = TrigTable::new(4);
        assert_eq!(trig.len(), 4);
        assert!((trig.cos(0) - 1.0).abs() < 1e-12);
        assert!((trig.sin(1) - 1.0).abs() < 1e-12);
        assert!((trig.cos(2) + 1.0).abs() < 1e-12);
        assert!((trig.sin(3) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn projection_truncates_toward_zero() {
        let trig = TrigTable::new(4);
        // 3π/2: -y plus a tiny cos term, truncated to 0 for y = 0.
        assert_eq!(trig.project(5, 0, 3, 14), Some(0));
        assert_eq!(trig.project(5, 5, 2, 14), None);
        assert_eq!(trig.project(13, 0, 0, 14), Some(13));
        assert_eq!(trig.project(14, 0, 0, 14), None);
    }

    #[test]
    fn empty_mask_has_no_votes() {
        let mask = EdgeMask::from_fn(10, 10, |_, _| false);
        let acc = accumulate(&mask, 16);
        assert_eq!(acc.r_steps(), 14);
        assert_eq!(acc.angle_steps(), 16);
        assert_eq!(acc.total_votes(), 0);
        assert_eq!(acc.max_votes(), 0);
    }

    #[test]
    fn single_pixel_on_x_axis_votes_at_projection() {
        // (x, 0) votes at trunc(x cos θ) for every angle with a non-negative projection.
        let x = 7;
        let mask = EdgeMask::from_fn(10, 10, |px, py| px == x && py == 0);
        let acc = accumulate(&mask, 4);
        assert_eq!(acc.get(7, 0), 1);
        // cos(π/2) is ~6e-17, so the projection truncates to 0.
        assert_eq!(acc.get(0, 1), 1);
        // cos(π) = -1: negative distance, dropped.
        assert_eq!(acc.row(0)[2], 0);
        // cos(3π/2) is ~-1.8e-16, truncated to 0.
        assert_eq!(acc.get(0, 3), 1);
        assert_eq!(acc.total_votes(), 3);
    }

    #[test]
    fn center_pixel_votes_once_per_visible_angle() {
        let mask = EdgeMask::from_fn(10, 10, |x, y| x == 5 && y == 5);
        let acc = accumulate(&mask, 4);
        assert_eq!(acc.get(5, 0), 1);
        assert_eq!(acc.get(5, 1), 1);
        // θ = π and 3π/2 project to -5 and are dropped.
        assert_eq!(acc.total_votes(), 2);
        assert_eq!(acc.max_votes(), 1);
    }

    #[test]
    fn collinear_points_share_a_cell() {
        // Vertical line x = 3 votes 10 times into (r = 3, θ = 0).
        let mask = EdgeMask::from_fn(10, 10, |x, _| x == 3);
        let acc = accumulate(&mask, 8);
        assert_eq!(acc.get(3, 0), 10);
        assert_eq!(acc.max_votes(), 10);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mask = EdgeMask::from_fn(37, 23, |x, y| (x * 7 + y * 13) % 5 == 0);
        for steps in [1, 3, 90, 360] {
            assert_eq!(accumulate(&mask, steps), accumulate_sequential(&mask, steps));
        }
    }

    #[test]
    fn tall_mask_parallel_matches_sequential() {
        let mask = EdgeMask::from_fn(6, 401, |x, y| (x + y) % 3 == 0 || y % 50 == 0);
        assert_eq!(accumulate(&mask, 180), accumulate_sequential(&mask, 180));
    }

    #[test]
    fn row_batches_cover_all_threads() {
        assert_eq!(rows_per_job(1000, 8), 125);
        assert_eq!(rows_per_job(1001, 8), 126);
        assert_eq!(rows_per_job(3, 8), 1);
        assert_eq!(rows_per_job(0, 8), 1);
        assert_eq!(rows_per_job(10, 0), 10);
    }

    #[test]
    fn zero_angle_steps_yields_empty_accumulator() {
        let mask = EdgeMask::from_fn(4, 4, |_, _| true);
        let acc = accumulate(&mask, 0);
        assert_eq!(acc.angle_steps(), 0);
        assert!(acc.as_raw().is_empty());
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(Accumulator::from_raw(2, 3, vec![0; 6]).is_some());
        assert!(Accumulator::from_raw(2, 3, vec![0; 7]).is_none());
    }
}
