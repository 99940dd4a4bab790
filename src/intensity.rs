//! Per-pixel intensity grid consumed by the binarizer.

use image::{GrayImage, RgbImage};
use rayon::prelude::*;

/// Number of colour channels summed by [`IntensityGrid::from_rgb_sum`].
///
/// Multiply a per-channel threshold (0-255) by this to compare it against
/// channel sums.
pub const RGB_CHANNELS: u32 = 3;

/// Row-major grid of pixel intensities.
///
/// The scale depends on how the grid was built: 0-765 for RGB channel sums,
/// 0-255 for luma. The grid is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl IntensityGrid {
    /// Wraps an existing row-major buffer.
    ///
    /// Returns `None` when `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u32>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> u32,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Sums the red, green and blue channels of every pixel (scale 0-765).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use image::{Rgb, RgbImage};
    /// use hough_lines::IntensityGrid;
    ///
    /// let image = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
    /// let grid = IntensityGrid::from_rgb_sum(&image);
    /// assert_eq!(grid.get(1, 1), 60);
    /// ```
    pub fn from_rgb_sum(image: &RgbImage) -> Self {
        let data = image
            .as_raw()
            .par_chunks_exact(RGB_CHANNELS as usize)
            .map(|px| px.iter().map(|&c| c as u32).sum::<u32>())
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    /// Uses the luma value of every pixel (scale 0-255).
    pub fn from_luma(image: &GrayImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().iter().map(|&v| v as u32).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Intensity at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn as_raw(&self) -> &[u32] {
        &self.data
    }
}
