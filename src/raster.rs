//! Conversion of Hough lines back to drawable image-space segments.

use std::f64::consts::FRAC_PI_2;

use crate::LineParams;

/// Below this magnitude a sine or cosine is treated as zero and the line as
/// axis-aligned.
pub const AXIS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Segment clipped to the image rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    /// Endpoints in the `(f32, f32)` form `imageproc` drawing takes.
    pub fn as_f32(&self) -> ((f32, f32), (f32, f32)) {
        (
            (self.start.x as f32, self.start.y as f32),
            (self.end.x as f32, self.end.y as f32),
        )
    }
}

/// Maps a Hough line to the segment drawn for it in a `width` x `height`
/// image, or `None` when the line misses the image.
///
/// # Algorithm
///
/// 1. Intersect the line with the top and bottom edges:
///    `x0 = r / cos θ`, `x1 = x0 - tan θ * height`
/// 2. Intersect it with the left and right edges:
///    `y0 = r / cos(π/2 - θ)`, `y1 = y0 - width / tan θ`
/// 3. Give up if both x intercepts lie left of the image, both right of it,
///    or both y intercepts lie above or below it
/// 4. Swap the x intercepts when `(y1 > y0) == (x1 > x0)` so that the pair
///    `(x0, y0)`, `(x1, y1)` follows the line's slope
/// 5. Clamp every coordinate to its axis range independently
///
/// Clamping is per axis, not a true line/rectangle intersection, so a
/// segment near a corner may leave the mathematical line.
///
/// Lines with `sin θ` or `cos θ` within [`AXIS_EPSILON`] of zero are
/// vertical or horizontal and get exact axis-aligned endpoints instead.
///
/// # Examples
///
/// ```rust
/// use hough_lines::{rasterize, LineParams};
///
/// // Vertical line x = 3.
/// let seg = rasterize(&LineParams::new(3, 0.0), 10, 8).unwrap();
/// assert_eq!((seg.start.x, seg.start.y, seg.end.x, seg.end.y), (3.0, 0.0, 3.0, 8.0));
///
/// // Fully to the right of a 10 pixel wide image.
/// assert!(rasterize(&LineParams::new(12, 0.0), 10, 8).is_none());
/// ```
pub fn rasterize(line: &LineParams, width: u32, height: u32) -> Option<Segment> {
    let (w, h) = (width as f64, height as f64);
    let r = line.r as f64;
    let theta = line.theta;
    let (sin, cos) = theta.sin_cos();

    if sin.abs() < AXIS_EPSILON {
        let x = r / cos;
        if x < 0.0 || x >= w {
            return None;
        }
        return Some(Segment::new(Point::new(x, 0.0), Point::new(x, h)));
    }
    if cos.abs() < AXIS_EPSILON {
        let y = r / sin;
        if y < 0.0 || y >= h {
            return None;
        }
        return Some(Segment::new(Point::new(0.0, y), Point::new(w, y)));
    }

    let tan = theta.tan();
    let mut x0 = r / cos;
    let mut x1 = x0 - tan * h;
    let y0 = r / (FRAC_PI_2 - theta).cos();
    let y1 = y0 - 1.0 / tan * w;

    let misses = (x0 < 0.0 && x1 < 0.0)
        || (y0 < 0.0 && y1 < 0.0)
        || (x0 >= w && x1 >= w)
        || (y0 >= h && y1 >= h);
    if misses {
        return None;
    }

    if (y1 > y0) == (x1 > x0) {
        std::mem::swap(&mut x0, &mut x1);
    }

    Some(Segment::new(
        Point::new(x0.clamp(0.0, w), y0.clamp(0.0, h)),
        Point::new(x1.clamp(0.0, w), y1.clamp(0.0, h)),
    ))
}
