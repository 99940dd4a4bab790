//! Detection parameters.

use crate::HoughError;

/// Parameters for one detection run.
///
/// # Fields
///
/// * `angle_steps` - Number of angle samples over a full 2π sweep (must be positive)
/// * `hough_threshold` - A cell needs strictly more votes than this to become a line;
///   zero or negative accepts every local maximum with at least one vote
/// * `binarization_threshold` - Pixels with intensity strictly below this are edges.
///   Expressed on the intensity grid's own scale (0-765 for RGB channel sums)
///
/// # Examples
///
/// ```rust
/// use hough_lines::HoughConfig;
///
/// let config = HoughConfig::new(720, 80, 300);
/// assert!(config.validate().is_ok());
/// assert!(HoughConfig::new(0, 80, 300).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoughConfig {
    pub angle_steps: u32,
    pub hough_threshold: i64,
    pub binarization_threshold: i64,
}

impl HoughConfig {
    pub fn new(angle_steps: u32, hough_threshold: i64, binarization_threshold: i64) -> Self {
        Self {
            angle_steps,
            hough_threshold,
            binarization_threshold,
        }
    }

    /// Builds a config for RGB channel-sum grids from a per-channel
    /// binarization threshold (0-255 scale).
    ///
    /// Returns `None` when the scaled threshold does not fit in an `i64`.
    ///
    /// ```rust
    /// use hough_lines::HoughConfig;
    ///
    /// let config = HoughConfig::with_channel_threshold(360, 100, 128).unwrap();
    /// assert_eq!(config.binarization_threshold, 384);
    /// assert!(HoughConfig::with_channel_threshold(360, 100, i64::MAX).is_none());
    /// ```
    pub fn with_channel_threshold(
        angle_steps: u32,
        hough_threshold: i64,
        channel_threshold: i64,
    ) -> Option<Self> {
        let binarization_threshold = channel_threshold.checked_mul(crate::RGB_CHANNELS as i64)?;
        Some(Self::new(angle_steps, hough_threshold, binarization_threshold))
    }

    /// Checks the parameters that the stages cannot accept.
    ///
    /// Thresholds are never rejected: out-of-range values just produce an
    /// all-edge or edge-free mask, or accept every peak.
    pub fn validate(&self) -> Result<(), HoughError> {
        if self.angle_steps == 0 {
            return Err(HoughError::InvalidAngleSteps);
        }
        Ok(())
    }
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            angle_steps: 360,
            hough_threshold: 100,
            // Mid-grey on the 0-765 channel-sum scale.
            binarization_threshold: 128 * crate::RGB_CHANNELS as i64,
        }
    }
}
