//! Error type for the detection entry points.

/// Errors surfaced by [`detect_lines`](crate::detect_lines) and
/// [`detect_lines_in_image`](crate::detect_lines_in_image).
///
/// The individual stages never fail; only configuration checks and the
/// image codec can.
#[derive(Debug, thiserror::Error)]
pub enum HoughError {
    /// The angle resolution must sample at least one angle.
    #[error("angle steps must be positive")]
    InvalidAngleSteps,

    /// Decoding or encoding an image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            HoughError::InvalidAngleSteps.to_string(),
            "angle steps must be positive"
        );
    }

    #[test]
    fn image_error_converts() {
        let err = image::load_from_memory(&[0xFF, 0xFE, 0x00, 0x01]).unwrap_err();
        let converted: HoughError = err.into();
        assert!(matches!(converted, HoughError::Image(_)));
        assert!(converted.to_string().starts_with("image error: "));
    }
}
