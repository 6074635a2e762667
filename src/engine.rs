//! Core watermarking engine.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};

use crate::discovery;
use crate::error::{Error, Result};
use crate::layout::{self, Position};

/// Default watermark file, relative to the working directory.
pub const DEFAULT_WATERMARK: &str = "watermark.png";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default JPEG encoding quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Settings for one watermarking run.
///
/// Built once from command-line arguments and shared read-only by every
/// step of the run.
#[derive(Debug, Clone)]
pub struct WatermarkConfig {
    /// Image file or directory of images to watermark.
    pub source: PathBuf,
    /// Watermark image; must be an existing `.png` file.
    pub watermark: PathBuf,
    /// Where the watermark is anchored on each image.
    pub position: Position,
    /// Explicit watermark box: `[edge]` or `[width, height, ..]`.
    /// `None` uses 15% of the main image width.
    pub size: Option<Vec<i64>>,
    /// Directory results are written to; created if missing.
    pub output_dir: PathBuf,
    /// JPEG quality (1-100) for `.jpg`/`.jpeg` outputs.
    pub jpeg_quality: u8,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            watermark: PathBuf::from(DEFAULT_WATERMARK),
            position: Position::BottomRight,
            size: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Output files written, in processing order.
    pub written: Vec<PathBuf>,
}

/// Applies a watermark to images according to a [`WatermarkConfig`].
pub struct Watermarker {
    config: WatermarkConfig,
}

impl Watermarker {
    /// Create a watermarker for the given run configuration.
    #[must_use]
    pub fn new(config: WatermarkConfig) -> Self {
        Self { config }
    }

    /// The configuration this watermarker runs with.
    #[must_use]
    pub fn config(&self) -> &WatermarkConfig {
        &self.config
    }

    /// Composite `watermark` onto a copy of `main`.
    ///
    /// The watermark is shrunk to fit the configured scale box, placed at the
    /// configured position and blended through its own alpha channel. The
    /// result has the same colour type as `main`.
    #[must_use]
    pub fn apply(&self, main: &DynamicImage, watermark: &DynamicImage) -> DynamicImage {
        let main_dims = (main.width(), main.height());
        let bounds = layout::scale_box(main_dims.0, self.config.size.as_deref());
        let (wm_w, wm_h) = layout::fit_within(watermark.width(), watermark.height(), bounds);

        let mark = if (wm_w, wm_h) == (watermark.width(), watermark.height()) {
            watermark.to_rgba8()
        } else {
            imageops::resize(&watermark.to_rgba8(), wm_w, wm_h, FilterType::Lanczos3)
        };

        let (x, y) = layout::offset(main_dims, (wm_w, wm_h), self.config.position);
        tracing::debug!(
            "box {}x{}, watermark {wm_w}x{wm_h}, offset ({x}, {y})",
            bounds.width,
            bounds.height
        );

        let mut canvas = main.to_rgba8();
        imageops::overlay(&mut canvas, &mark, x, y);

        restore_color(DynamicImage::ImageRgba8(canvas), main.color())
    }

    /// Watermark one image file and save it into the output directory.
    ///
    /// The output keeps the input's file name; an existing file of that name
    /// is overwritten. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if either image cannot be read or decoded, the output
    /// directory cannot be created, or the result cannot be encoded.
    pub fn process_file(&self, input: &Path) -> Result<PathBuf> {
        tracing::debug!("processing {}", input.display());

        let main = open_image(input)?;
        let watermark = open_image(&self.config.watermark)?;
        let result = self.apply(&main, &watermark);

        let name = input
            .file_name()
            .ok_or_else(|| Error::InvalidSource(input.to_path_buf()))?;
        std::fs::create_dir_all(&self.config.output_dir)?;
        let output = self.config.output_dir.join(name);

        save_image(&result, &output, self.config.jpeg_quality)?;
        tracing::info!("{} -> {}", input.display(), output.display());

        Ok(output)
    }

    /// Validate the watermark, resolve the source, and process every candidate
    /// in order.
    ///
    /// The first failing image aborts the run; later images are not attempted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWatermark`] or [`Error::InvalidSource`] for bad
    /// inputs, or the error of the first image that fails.
    pub fn run(&self) -> Result<RunSummary> {
        discovery::validate_watermark(&self.config.watermark)?;
        let candidates = discovery::collect_candidates(&self.config.source)?;
        tracing::debug!("{} candidate image(s)", candidates.len());

        let mut summary = RunSummary::default();
        for input in &candidates {
            summary.written.push(self.process_file(input)?);
        }
        Ok(summary)
    }
}

/// Convert a composited RGBA image back to the source image's colour type.
fn restore_color(img: DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(img.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(img.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(img.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(img.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(img.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(img.to_rgba32f()),
        _ => img,
    }
}

/// Decode an image, sniffing the format from its contents.
fn open_image(path: &Path) -> Result<DynamicImage> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

/// Save an image in the format implied by the extension of `path`.
///
/// JPEG output is encoded at `jpeg_quality`, as grayscale for 8-bit luma
/// images and RGB otherwise; PNG keeps the image's colour type. The file is
/// flushed before returning so write failures surface as errors.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &DynamicImage, path: &Path, jpeg_quality: u8) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            {
                let mut encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
                match img {
                    DynamicImage::ImageLuma8(gray) => encoder.encode_image(gray)?,
                    _ => encoder.encode_image(&img.to_rgb8())?,
                }
            }
            writer.flush()?;
        }
        ImageFormat::Png => {
            let mut writer = BufWriter::new(File::create(path)?);
            img.write_to(&mut writer, ImageFormat::Png)?;
            writer.flush()?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}
