//! Watermark sizing and placement arithmetic.
//!
//! The watermark is shrunk to fit a [`ScaleBox`] while keeping its aspect ratio,
//! then placed at an offset derived from a [`Position`] keyword:
//!
//! | Position      | x                       | y                         |
//! |---------------|-------------------------|---------------------------|
//! | `topleft`     | 20                      | 0                         |
//! | `topright`    | `main_w - wm_w`         | 0                         |
//! | `bottomleft`  | 20                      | `main_h - wm_h`           |
//! | `bottomright` | `main_w - wm_w`         | `main_h - wm_h`           |

use std::fmt;

/// Fixed left margin for the left-hand positions, in pixels.
pub const LEFT_MARGIN: i64 = 20;

/// Default watermark box edge as a fraction of the main image width.
pub const DEFAULT_SCALE: f64 = 0.15;

/// Corner of the main image the watermark is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Top edge, 20px from the left.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom edge, 20px from the left.
    BottomLeft,
    /// Bottom-right corner.
    #[default]
    BottomRight,
}

impl Position {
    /// Parse a position keyword, ignoring ASCII case.
    ///
    /// Returns `None` for anything other than `topleft`, `topright`,
    /// `bottomleft` or `bottomright`.
    #[must_use]
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "topleft" => Some(Self::TopLeft),
            "topright" => Some(Self::TopRight),
            "bottomleft" => Some(Self::BottomLeft),
            "bottomright" => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Parse a position keyword, falling back to [`Position::BottomRight`]
    /// for unrecognized values.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        Self::parse(keyword).unwrap_or_else(|| {
            tracing::warn!("unknown position {keyword:?}, using bottomright");
            Self::BottomRight
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        };
        f.write_str(name)
    }
}

/// Bounding box the watermark is shrunk to fit within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleBox {
    /// Maximum watermark width in pixels.
    pub width: u32,
    /// Maximum watermark height in pixels.
    pub height: u32,
}

impl ScaleBox {
    /// Square box of 15% of `main_width` on each side.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn default_for(main_width: u32) -> Self {
        let edge = (f64::from(main_width) * DEFAULT_SCALE).floor() as u32;
        Self {
            width: edge,
            height: edge,
        }
    }
}

/// Compute the scale box for a main image of width `main_width`.
///
/// - `None` or an empty list: [`ScaleBox::default_for`].
/// - A negative width or height: the default, with a warning.
/// - One value: square box of that size.
/// - Two or more values: first is width, second is height; the rest are ignored.
#[must_use]
pub fn scale_box(main_width: u32, size: Option<&[i64]>) -> ScaleBox {
    let fallback = ScaleBox::default_for(main_width);

    let (width, height) = match size {
        None | Some([]) => return fallback,
        Some([edge]) => (*edge, *edge),
        Some([width, height, ..]) => (*width, *height),
    };

    if width < 0 || height < 0 {
        tracing::warn!("negative size {width}x{height}, using default watermark size");
        return fallback;
    }

    ScaleBox {
        width: u32::try_from(width).unwrap_or(u32::MAX),
        height: u32::try_from(height).unwrap_or(u32::MAX),
    }
}

/// Dimensions of a `width` x `height` image shrunk to fit `bounds`.
///
/// Aspect ratio is preserved and the image is never enlarged. Each side is at
/// least 1 pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_within(width: u32, height: u32, bounds: ScaleBox) -> (u32, u32) {
    if (width <= bounds.width && height <= bounds.height) || width == 0 || height == 0 {
        return (width, height);
    }

    let ratio = (f64::from(bounds.width) / f64::from(width))
        .min(f64::from(bounds.height) / f64::from(height));

    let fit = |side: u32, limit: u32| -> u32 {
        (f64::from(side) * ratio)
            .round()
            .clamp(1.0, f64::from(limit.max(1))) as u32
    };

    (fit(width, bounds.width), fit(height, bounds.height))
}

/// Top-left corner of the watermark within the main image.
///
/// Offsets are signed: a watermark larger than the main image yields negative
/// coordinates, which the compositor clips.
#[must_use]
pub fn offset(main: (u32, u32), watermark: (u32, u32), position: Position) -> (i64, i64) {
    let right = i64::from(main.0) - i64::from(watermark.0);
    let bottom = i64::from(main.1) - i64::from(watermark.1);

    match position {
        Position::TopLeft => (LEFT_MARGIN, 0),
        Position::TopRight => (right, 0),
        Position::BottomLeft => (LEFT_MARGIN, bottom),
        Position::BottomRight => (right, bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parse_ignores_case() {
        assert_eq!(Position::parse("topleft"), Some(Position::TopLeft));
        assert_eq!(Position::parse("TopRight"), Some(Position::TopRight));
        assert_eq!(Position::parse("BOTTOMLEFT"), Some(Position::BottomLeft));
        assert_eq!(Position::parse("bottomRight"), Some(Position::BottomRight));
        assert_eq!(Position::parse("center"), None);
    }

    #[test]
    fn unknown_position_falls_back_to_bottomright() {
        assert_eq!(Position::from_keyword("middle"), Position::BottomRight);
        assert_eq!(Position::from_keyword(""), Position::BottomRight);
        assert_eq!(Position::from_keyword("TOPLEFT"), Position::TopLeft);
    }

    #[test]
    fn position_display_round_trips_keyword() {
        for p in [
            Position::TopLeft,
            Position::TopRight,
            Position::BottomLeft,
            Position::BottomRight,
        ] {
            assert_eq!(Position::parse(&p.to_string()), Some(p));
        }
    }

    #[test]
    fn scale_box_defaults_to_fifteen_percent_of_width() {
        let b = scale_box(1000, None);
        assert_eq!(b, ScaleBox { width: 150, height: 150 });

        // floor of 0.15 * 333 = 49.95
        assert_eq!(scale_box(333, None).width, 49);
        assert_eq!(scale_box(333, Some(&[])), ScaleBox::default_for(333));
    }

    #[test]
    fn scale_box_negative_component_uses_default() {
        assert_eq!(scale_box(1000, Some(&[-5, 10])), ScaleBox::default_for(1000));
        assert_eq!(scale_box(1000, Some(&[10, -1])), ScaleBox::default_for(1000));
        assert_eq!(scale_box(1000, Some(&[-300])), ScaleBox::default_for(1000));
    }

    #[test]
    fn scale_box_uses_explicit_values() {
        assert_eq!(
            scale_box(1000, Some(&[300])),
            ScaleBox { width: 300, height: 300 }
        );
        assert_eq!(
            scale_box(1000, Some(&[300, 200])),
            ScaleBox { width: 300, height: 200 }
        );
        assert_eq!(
            scale_box(1000, Some(&[300, 200, 50, -7])),
            ScaleBox { width: 300, height: 200 }
        );
    }

    #[test]
    fn fit_within_preserves_aspect_ratio() {
        let bounds = ScaleBox { width: 150, height: 150 };
        assert_eq!(fit_within(300, 100, bounds), (150, 50));
        assert_eq!(fit_within(100, 300, bounds), (50, 150));
        assert_eq!(fit_within(600, 600, bounds), (150, 150));
    }

    #[test]
    fn fit_within_never_enlarges() {
        let bounds = ScaleBox { width: 500, height: 500 };
        assert_eq!(fit_within(64, 32, bounds), (64, 32));
    }

    #[test]
    fn fit_within_zero_box_keeps_one_pixel() {
        let bounds = ScaleBox { width: 0, height: 0 };
        assert_eq!(fit_within(64, 32, bounds), (1, 1));
    }

    #[test]
    fn offsets_for_each_position() {
        let main = (1000, 800);
        let wm = (100, 100);
        assert_eq!(offset(main, wm, Position::TopLeft), (20, 0));
        assert_eq!(offset(main, wm, Position::TopRight), (900, 0));
        assert_eq!(offset(main, wm, Position::BottomLeft), (20, 700));
        assert_eq!(offset(main, wm, Position::BottomRight), (900, 700));
        assert_eq!(
            offset(main, wm, Position::from_keyword("nowhere")),
            (900, 700)
        );
    }

    #[test]
    fn offset_goes_negative_for_oversized_watermark() {
        assert_eq!(offset((50, 40), (80, 60), Position::BottomRight), (-30, -20));
    }
}
