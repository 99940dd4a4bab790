//! Intensity thresholding into an edge mask.

use rayon::prelude::*;

use crate::IntensityGrid;

/// Boolean edge mask with the same dimensions as its source grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl EdgeMask {
    /// Builds a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
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

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether `(x, y)` is an edge pixel. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// One row of the mask.
    pub fn row(&self, y: u32) -> &[bool] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.data[start..start + width]
    }

    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&e| e).count()
    }

    /// Edge pixel coordinates in row-major order.
    pub fn iter_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1) as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    pub fn as_raw(&self) -> &[bool] {
        &self.data
    }
}

/// Thresholds an intensity grid: a pixel is an edge iff its intensity is
/// strictly below `threshold`.
///
/// Any threshold is accepted. One at or below the grid's minimum yields an
/// empty mask, one above its maximum marks every pixel.
///
/// # Examples
///
/// ```rust
/// use hough_lines::{binarize, IntensityGrid};
///
/// let grid = IntensityGrid::from_fn(3, 1, |x, _| x * 100);
/// let mask = binarize(&grid, 150);
/// assert_eq!(mask.as_raw(), &[true, true, false]);
/// ```
pub fn binarize(grid: &IntensityGrid, threshold: i64) -> EdgeMask {
    let data = grid
        .as_raw()
        .par_iter()
        .map(|&v| (v as i64) < threshold)
        .collect();
    EdgeMask {
        width: grid.width(),
        height: grid.height(),
        data,
    }
}
