//! Rendering of detection results.

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::definitions::HasBlack;
use imageproc::drawing::draw_line_segment_mut;
use rayon::prelude::*;

use crate::{Accumulator, Segment};

/// Colour used for detected lines: black, one pixel wide.
pub const LINE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Draws segments onto a copy of `image`.
///
/// Endpoints on the far image border (`x == width` or `y == height`) are
/// valid; pixels falling outside the canvas are skipped by the line drawer.
///
/// # Examples
///
/// ```rust
/// use image::{Rgb, RgbImage};
/// use hough_lines::{draw_segments, Point, Segment, LINE_COLOR};
///
/// let image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
/// let seg = Segment::new(Point::new(3.0, 0.0), Point::new(3.0, 10.0));
/// let out = draw_segments(&image, &[seg], LINE_COLOR);
/// assert_eq!(out.get_pixel(3, 5), &LINE_COLOR);
/// ```
pub fn draw_segments(image: &RgbImage, segments: &[Segment], color: Rgb<u8>) -> RgbImage {
    let mut canvas = image.clone();

    let endpoints: Vec<_> = segments
        .par_iter()
        .filter(|s| s.start.x.is_finite() && s.start.y.is_finite())
        .filter(|s| s.end.x.is_finite() && s.end.y.is_finite())
        .map(Segment::as_f32)
        .collect();

    // Serial drawing, segments may overlap.
    for (start, end) in endpoints {
        draw_line_segment_mut(&mut canvas, start, end, color);
    }

    canvas
}

/// Renders the accumulator as a greyscale image, one pixel per cell.
///
/// Columns are angle bins, rows are distance bins. Vote counts are scaled
/// so the strongest cell is white; an accumulator without votes is black.
pub fn visualize_accumulator(acc: &Accumulator) -> GrayImage {
    let max = acc.max_votes();
    let (width, height) = (acc.angle_steps() as u32, acc.r_steps() as u32);
    if max == 0 {
        return ImageBuffer::from_pixel(width, height, Luma::<u8>::black());
    }

    let data: Vec<u8> = acc
        .as_raw()
        .par_iter()
        .map(|&v| ((v as u64 * 255) / max as u64) as u8)
        .collect();
    // Buffer length is r_steps * angle_steps by construction.
    ImageBuffer::from_raw(width, height, data)
        .unwrap_or_else(|| ImageBuffer::from_pixel(width, height, Luma::<u8>::black()))
}
