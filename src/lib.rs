//! Batch-apply a PNG watermark onto images.
//!
//! Each source image gets the watermark shrunk to a bounding box (15% of the
//! image width by default, aspect ratio preserved), anchored to one of four
//! corners, alpha-composited, and saved under the same file name into an
//! output directory.
//!
//! # Quick Start
//!
//! ```no_run
//! use batch_watermark::{Position, WatermarkConfig, Watermarker};
//!
//! let config = WatermarkConfig {
//!     source: "photos".into(),
//!     watermark: "logo.png".into(),
//!     position: Position::TopRight,
//!     ..WatermarkConfig::default()
//! };
//! let summary = Watermarker::new(config).run().expect("watermarking failed");
//! println!("wrote {} image(s)", summary.written.len());
//! ```
//!
//! # In-memory use
//!
//! ```no_run
//! use batch_watermark::{WatermarkConfig, Watermarker};
//!
//! let engine = Watermarker::new(WatermarkConfig::default());
//! let photo = image::open("photo.jpg").unwrap();
//! let logo = image::open("logo.png").unwrap();
//! engine.apply(&photo, &logo).save("branded.jpg").unwrap();
//! ```

#![deny(missing_docs)]

pub mod discovery;
mod engine;
pub mod error;
pub mod layout;

pub use discovery::{collect_candidates, has_supported_suffix, validate_watermark};
pub use engine::{
    save_image, RunSummary, WatermarkConfig, Watermarker, DEFAULT_JPEG_QUALITY,
    DEFAULT_OUTPUT_DIR, DEFAULT_WATERMARK,
};
pub use error::{Error, Result};
pub use layout::{Position, ScaleBox};
