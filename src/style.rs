//! Styling configuration for rendered QR codes.
//!
//! [`QrStyle`] mirrors the options a QR preview exposes: canvas size, margin, error-correction
//! level, colors and shapes for ordinary modules and the three finder patterns, and an optional
//! logo. It deserializes from camelCase JSON with every field optional:
//!
//! ```rust
//! use qrforge::style::{DotType, ErrorCorrectionLevel, QrStyle};
//!
//! let style = QrStyle::from_json(r##"{
//!     "size": 512,
//!     "errorCorrectionLevel": "H",
//!     "dots": { "color": "#000", "type": "dots" }
//! }"##).unwrap();
//!
//! assert_eq!(style.size(), 512);
//! assert_eq!(style.error_correction_level, ErrorCorrectionLevel::H);
//! assert_eq!(style.dots.kind, DotType::Dots);
//! assert_eq!(style.margin(), 10);
//! ```
use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

use image::Rgba;
use qrcodegen::QrCodeEcc;
use serde::{Deserialize, Serialize};

use crate::QrError;

pub const MIN_SIZE: u32 = 64;
pub const MAX_SIZE: u32 = 1024;
pub const MAX_MARGIN: u32 = 20;

const BRAND_PURPLE: Color = Color::rgb(0x56, 0x0a, 0x86);

/// An sRGB color with alpha, written as a CSS hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QrError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Ok(Color {
                r: pair(0)?,
                g: pair(2)?,
                b: pair(4)?,
                a: pair(6)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = QrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// QR error-correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    /// Tolerates ~7% erroneous codewords.
    L,
    /// Tolerates ~15% erroneous codewords.
    M,
    /// Tolerates ~25% erroneous codewords.
    #[default]
    Q,
    /// Tolerates ~30% erroneous codewords.
    H,
}

impl From<ErrorCorrectionLevel> for QrCodeEcc {
    fn from(level: ErrorCorrectionLevel) -> Self {
        match level {
            ErrorCorrectionLevel::L => QrCodeEcc::Low,
            ErrorCorrectionLevel::M => QrCodeEcc::Medium,
            ErrorCorrectionLevel::Q => QrCodeEcc::Quartile,
            ErrorCorrectionLevel::H => QrCodeEcc::High,
        }
    }
}

/// Geometry used to paint a single dark module inside its square cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModuleShape {
    Square,
    Circle,
    /// Rounded square; `radius` is a fraction of the cell side, in `(0, 0.5]`.
    Rounded { radius: f32 },
}

impl ModuleShape {
    /// Whether the point `(fx, fy)`, given in cell coordinates `[0, 1)`, is painted.
    pub fn covers(self, fx: f32, fy: f32) -> bool {
        match self {
            Self::Square => true,
            Self::Circle => {
                let (dx, dy) = (fx - 0.5, fy - 0.5);
                dx * dx + dy * dy <= 0.25
            }
            Self::Rounded { radius } => {
                let cx = fx.clamp(radius, 1.0 - radius);
                let cy = fy.clamp(radius, 1.0 - radius);
                let (dx, dy) = (fx - cx, fy - cy);
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}

/// Shape of ordinary (non-finder) modules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotType {
    #[default]
    Rounded,
    Dots,
    Classy,
    ClassyRounded,
    Square,
    ExtraRounded,
}

impl DotType {
    pub fn shape(self) -> ModuleShape {
        match self {
            Self::Square => ModuleShape::Square,
            Self::Dots => ModuleShape::Circle,
            Self::Rounded | Self::Classy | Self::ClassyRounded => ModuleShape::Rounded { radius: 0.25 },
            Self::ExtraRounded => ModuleShape::Rounded { radius: 0.5 },
        }
    }
}

/// Shape of the outer 7x7 ring of each finder pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerSquareType {
    Dot,
    Square,
    #[default]
    ExtraRounded,
}

impl CornerSquareType {
    /// Shape applied to each module of the ring on its own.
    ///
    /// `Dot` paints every ring module as a small circle rather than one round ring over the whole
    /// finder pattern, and `ExtraRounded` likewise rounds each module separately.
    pub fn shape(self) -> ModuleShape {
        match self {
            Self::Dot => ModuleShape::Circle,
            Self::Square => ModuleShape::Square,
            Self::ExtraRounded => ModuleShape::Rounded { radius: 0.5 },
        }
    }
}

/// Shape of the inner 3x3 block of each finder pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerDotType {
    #[default]
    Dot,
    Square,
}

impl CornerDotType {
    /// Shape applied to each of the nine inner modules; `Dot` gives nine circles, not one disc.
    pub fn shape(self) -> ModuleShape {
        match self {
            Self::Dot => ModuleShape::Circle,
            Self::Square => ModuleShape::Square,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotsOptions {
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: DotType,
}

impl Default for DotsOptions {
    fn default() -> Self {
        Self {
            color: BRAND_PURPLE,
            kind: DotType::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundOptions {
    pub color: Color,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self { color: Color::WHITE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornersSquareOptions {
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: CornerSquareType,
}

impl Default for CornersSquareOptions {
    fn default() -> Self {
        Self {
            color: BRAND_PURPLE,
            kind: CornerSquareType::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornersDotOptions {
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: CornerDotType,
}

impl Default for CornersDotOptions {
    fn default() -> Self {
        Self {
            color: BRAND_PURPLE,
            kind: CornerDotType::default(),
        }
    }
}

/// Complete rendering configuration for one QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrStyle {
    /// Canvas side in pixels; see [`QrStyle::size`].
    pub size: u32,
    /// Background border around the symbol in pixels; see [`QrStyle::margin`].
    pub margin: u32,
    pub error_correction_level: ErrorCorrectionLevel,
    pub dots: DotsOptions,
    pub background: BackgroundOptions,
    pub corners_square: CornersSquareOptions,
    pub corners_dot: CornersDotOptions,
    /// Logo drawn over the center of raster output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            size: 300,
            margin: 10,
            error_correction_level: ErrorCorrectionLevel::default(),
            dots: DotsOptions::default(),
            background: BackgroundOptions::default(),
            corners_square: CornersSquareOptions::default(),
            corners_dot: CornersDotOptions::default(),
            image: None,
        }
    }
}

impl QrStyle {
    pub fn from_json(json: &str) -> Result<Self, QrError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Canvas side in pixels, clamped to `MIN_SIZE..=MAX_SIZE`.
    pub fn size(&self) -> u32 {
        self.size.clamp(MIN_SIZE, MAX_SIZE)
    }

    /// Margin in pixels, at most `MAX_MARGIN`.
    pub fn margin(&self) -> u32 {
        self.margin.min(MAX_MARGIN)
    }

    pub fn ecc(&self) -> QrCodeEcc {
        self.error_correction_level.into()
    }

    /// Plain black-on-white squares, for scanners that dislike decorated codes.
    pub fn plain() -> Self {
        Self {
            dots: DotsOptions {
                color: Color::BLACK,
                kind: DotType::Square,
            },
            corners_square: CornersSquareOptions {
                color: Color::BLACK,
                kind: CornerSquareType::Square,
            },
            corners_dot: CornersDotOptions {
                color: Color::BLACK,
                kind: CornerDotType::Square,
            },
            ..Self::default()
        }
    }
}
