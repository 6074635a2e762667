//! Error types for the batch-watermark crate.

use std::path::PathBuf;

/// Errors that can occur while resolving inputs or watermarking images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source path is neither a file nor a directory.
    #[error("{} is invalid or doesn't exist", .0.display())]
    InvalidSource(PathBuf),

    /// The watermark path is missing, not a regular file, or not a `.png`.
    #[error("{} is invalid or doesn't exist (watermark must be an existing .png file)", .0.display())]
    InvalidWatermark(PathBuf),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format has no encoder.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let unsupported = Error::UnsupportedFormat("tiff".to_string());
        assert!(unsupported.to_string().contains("tiff"));

        let source = Error::InvalidSource(PathBuf::from("photos/missing"));
        assert_eq!(
            source.to_string(),
            "photos/missing is invalid or doesn't exist"
        );

        let wm = Error::InvalidWatermark(PathBuf::from("logo.jpg"));
        let msg = wm.to_string();
        assert!(msg.starts_with("logo.jpg is invalid"));
        assert!(msg.contains(".png"));
    }
}
