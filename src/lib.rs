//! # Hough Line Detection Library
//!
//! This crate detects straight lines in raster images with the classic Hough
//! transform. Edge pixels vote for every line passing through them in
//! (distance, angle) space, local maxima of the votes become lines, and the
//! lines are mapped back to segments that can be drawn over the input.
//!
//! ## Features
//!
//! - Intensity thresholding into an edge mask
//! - Parallel vote accumulation with per-worker buffers merged by addition
//! - Peak selection against diagonal neighbours in the accumulator
//! - Inverse mapping of lines to segments clipped to the image
//! - Segment overlay and accumulator visualization
//! - Optional debug logging (enable with `logger` feature)
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use image::open;
//! use hough_lines::{detect_lines_in_image, draw_segments, HoughConfig, LINE_COLOR};
//!
//! let image = open("example.png").unwrap();
//! let config = HoughConfig::new(360, 120, 300);
//! let detection = detect_lines_in_image(&image, &config).unwrap();
//!
//! let result = draw_segments(&image.to_rgb8(), &detection.segments, LINE_COLOR);
//! result.save("lines_output.png").unwrap();
//!
//! println!("Found {} lines", detection.peaks.len());
//! ```
//!
//! ## Optional Features
//!
//! ### Logger Feature
//!
//! Enable debug logging to monitor the detection pipeline:
//!
//! ```toml
//! [dependencies]
//! hough-lines = { version = "0.1.0", features = ["logger"] }
//! log = "0.4"
//! env_logger = "0.11"
//! ```
//!
//! ```rust,no_run
//! use image::open;
//! use hough_lines::{detect_lines_in_image, HoughConfig};
//!
//! env_logger::init();
//!
//! let image = open("example.png").unwrap();
//! let detection = detect_lines_in_image(&image, &HoughConfig::default()).unwrap();
//! // With logger feature, you'll see debug messages like:
//! // DEBUG hough_lines: edge pixels: 5120
//! // DEBUG hough_lines: accumulator 282x360, 1843200 votes
//! // DEBUG hough_lines: peak r=40 θ=1.5708 votes=212
//! ```
//!
//! ## Stage by Stage
//!
//! ```rust
//! use hough_lines::{accumulate, binarize, rasterize, select_peaks, IntensityGrid};
//!
//! // Dark vertical stroke at x = 4 on a bright 12x12 background.
//! let grid = IntensityGrid::from_fn(12, 12, |x, _| if x == 4 { 0 } else { 765 });
//! let mask = binarize(&grid, 300);
//! let acc = accumulate(&mask, 180);
//! let peaks = select_peaks(&acc, 10);
//!
//! let vertical = peaks.iter().find(|p| p.angle_index == 0).unwrap();
//! assert_eq!((vertical.line.r, vertical.votes), (4, 12));
//!
//! let segment = rasterize(&vertical.line, 12, 12).unwrap();
//! assert_eq!((segment.start.x, segment.end.x), (4.0, 4.0));
//! ```

use std::path::Path;

use image::DynamicImage;

// Conditional logging macros
#[cfg(feature = "logger")]
macro_rules! debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(feature = "logger"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

mod accumulator;
mod binarize;
mod config;
mod error;
mod intensity;
mod overlay;
mod peaks;
mod raster;

pub use accumulator::{accumulate, accumulate_sequential, r_steps, Accumulator, TrigTable};
pub use binarize::{binarize, EdgeMask};
pub use config::HoughConfig;
pub use error::HoughError;
pub use intensity::{IntensityGrid, RGB_CHANNELS};
pub use overlay::{draw_segments, visualize_accumulator, LINE_COLOR};
pub use peaks::{select_peaks, LineParams, Peak};
pub use raster::{rasterize, Point, Segment, AXIS_EPSILON};

/// Result of one detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Accepted accumulator cells, ordered by distance bin then angle bin.
    pub peaks: Vec<Peak>,
    /// Visible segments, in peak order. Peaks whose line misses the image
    /// have no segment here.
    pub segments: Vec<Segment>,
}

impl Detection {
    /// Lines of all accepted peaks.
    pub fn lines(&self) -> impl Iterator<Item = LineParams> + '_ {
        self.peaks.iter().map(|p| p.line)
    }
}

/// Runs the full Hough pipeline on an intensity grid.
///
/// # Arguments
///
/// * `grid` - Per-pixel intensities; dark pixels (below the threshold) are edges
/// * `config` - Angle resolution and the two thresholds
///
/// # Returns
///
/// The accepted peaks and the segments to draw for them.
///
/// # Errors
///
/// [`HoughError::InvalidAngleSteps`] when `config.angle_steps` is zero.
///
/// # Algorithm Pipeline
///
/// 1. Binarization: `intensity < binarization_threshold`
/// 2. Parallel vote accumulation over `angle_steps` angles
/// 3. Peak selection: votes `> hough_threshold` and not below diagonal neighbours
/// 4. Rasterization of every peak into a clipped segment
///
/// # Examples
///
/// ```rust
/// use hough_lines::{detect_lines, HoughConfig, IntensityGrid};
///
/// // A single dark pixel votes once per visible angle.
/// let grid = IntensityGrid::from_fn(10, 10, |x, y| if (x, y) == (5, 5) { 0 } else { 765 });
///
/// let found = detect_lines(&grid, &HoughConfig::new(4, 0, 100)).unwrap();
/// assert!(!found.peaks.is_empty());
///
/// let none = detect_lines(&grid, &HoughConfig::new(4, 1, 100)).unwrap();
/// assert!(none.peaks.is_empty());
/// ```
pub fn detect_lines(grid: &IntensityGrid, config: &HoughConfig) -> Result<Detection, HoughError> {
    config.validate()?;
    let (width, height) = grid.dimensions();
    debug!("start detect lines in {}x{} grid", width, height);

    let mask = binarize(grid, config.binarization_threshold);
    debug!("edge pixels: {}", mask.edge_count());

    let acc = accumulate(&mask, config.angle_steps);
    debug!(
        "accumulator {}x{}, {} votes",
        acc.r_steps(),
        acc.angle_steps(),
        acc.total_votes()
    );

    let peaks = select_peaks(&acc, config.hough_threshold);
    #[cfg(feature = "logger")]
    for peak in &peaks {
        debug!(
            "peak r={} θ={:.4} votes={}",
            peak.line.r, peak.line.theta, peak.votes
        );
    }

    let segments: Vec<Segment> = peaks
        .iter()
        .filter_map(|p| rasterize(&p.line, width, height))
        .collect();
    debug!("{} peaks, {} visible segments", peaks.len(), segments.len());

    Ok(Detection { peaks, segments })
}

/// Runs [`detect_lines`] on a decoded image.
///
/// Intensities are RGB channel sums (0-765), so `config.binarization_threshold`
/// is on that scale; multiply a per-channel threshold by [`RGB_CHANNELS`].
pub fn detect_lines_in_image(
    image: &DynamicImage,
    config: &HoughConfig,
) -> Result<Detection, HoughError> {
    let grid = IntensityGrid::from_rgb_sum(&image.to_rgb8());
    detect_lines(&grid, config)
}

/// Detects lines in an image file and writes a copy with the lines drawn.
///
/// The input is decoded by extension/content, binarized on RGB channel sums,
/// and the visible segments are drawn in [`LINE_COLOR`] onto the output,
/// whose format follows its extension.
///
/// # Errors
///
/// [`HoughError::Image`] when the input cannot be read or decoded, or the
/// output cannot be encoded or written; [`HoughError::InvalidAngleSteps`]
/// as for [`detect_lines`].
///
/// # Examples
///
/// ```rust,no_run
/// use hough_lines::{detect_lines_in_file, HoughConfig};
///
/// let detection = detect_lines_in_file("input.png", "out.jpg", &HoughConfig::default()).unwrap();
/// println!("{} lines", detection.peaks.len());
/// ```
pub fn detect_lines_in_file<P, Q>(
    input: P,
    output: Q,
    config: &HoughConfig,
) -> Result<Detection, HoughError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let image = image::open(input)?;
    debug!("loaded {}x{} image", image.width(), image.height());

    let detection = detect_lines_in_image(&image, config)?;
    draw_segments(&image.to_rgb8(), &detection.segments, LINE_COLOR).save(output)?;
    Ok(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hough_lines_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_debug_macro_no_panic() {
        debug!("Starting test");
        debug!("Processing data: {}", 42);
    }

    #[test]
    fn rejects_zero_angle_steps() {
        let grid = IntensityGrid::from_fn(4, 4, |_, _| 0);
        let result = detect_lines(&grid, &HoughConfig::new(0, 0, 10));
        assert!(matches!(result, Err(HoughError::InvalidAngleSteps)));
    }

    #[test]
    fn segments_follow_peaks() {
        let grid = IntensityGrid::from_fn(20, 20, |x, y| if x == 6 || y == 13 { 0 } else { 765 });
        let detection = detect_lines(&grid, &HoughConfig::new(4, 15, 100)).unwrap();
        let cells: Vec<_> = detection
            .peaks
            .iter()
            .map(|p| (p.line.r, p.angle_index, p.votes))
            .collect();
        // x = 6 at θ = 0 and y = 13 at θ = π/2.
        assert_eq!(cells, vec![(6, 0, 20), (13, 1, 20)]);
        assert_eq!(detection.segments.len(), detection.peaks.len());
        assert_eq!(detection.lines().count(), detection.peaks.len());
    }

    #[test]
    fn image_entry_point_uses_channel_sums() {
        let mut image = RgbImage::from_pixel(16, 16, Rgb([250, 250, 250]));
        for y in 0..16 {
            image.put_pixel(9, y, Rgb([10, 10, 10]));
        }
        let config = HoughConfig::new(8, 10, 100 * RGB_CHANNELS as i64);
        let detection = detect_lines_in_image(&DynamicImage::ImageRgb8(image), &config).unwrap();
        assert!(detection
            .peaks
            .iter()
            .any(|p| p.line.r == 9 && p.angle_index == 0 && p.votes == 16));
    }

    #[test]
    fn missing_input_file_is_image_error() {
        let result = detect_lines_in_file(
            temp_path("does_not_exist.png"),
            temp_path("unused.png"),
            &HoughConfig::default(),
        );
        assert!(matches!(result, Err(HoughError::Image(_))));
    }

    #[test]
    fn file_round_trip_draws_lines() {
        let input = temp_path("column_in.png");
        let output = temp_path("column_out.png");
        let mut image = RgbImage::from_pixel(16, 16, Rgb([250, 250, 250]));
        for y in 0..16 {
            image.put_pixel(9, y, Rgb([10, 10, 10]));
        }
        image.save(&input).unwrap();

        let config = HoughConfig::new(8, 10, 100 * RGB_CHANNELS as i64);
        let detection = detect_lines_in_file(&input, &output, &config).unwrap();
        assert!(!detection.segments.is_empty());

        let drawn = image::open(&output).unwrap().to_rgb8();
        assert_eq!(drawn.dimensions(), (16, 16));
        assert_eq!(drawn.get_pixel(9, 8), &LINE_COLOR);

        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(output);
    }

    #[test]
    fn unwritable_output_is_image_error() {
        let input = temp_path("blank_in.png");
        RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]))
            .save(&input)
            .unwrap();
        let result = detect_lines_in_file(&input, temp_path("out.unknownext"), &HoughConfig::default());
        assert!(matches!(result, Err(HoughError::Image(_))));
        let _ = std::fs::remove_file(input);
    }
}
