//! Rendering of payload strings into styled QR images.
//!
//! Symbol encoding is delegated to `qrcodegen`; this module only lays out and paints the module
//! grid according to a [`QrStyle`].
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose, Engine as _};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use qrcodegen::{QrCode, QrCodeEcc};
use tracing::{debug, warn};

use crate::style::{Color, ErrorCorrectionLevel, ModuleShape, QrStyle};
use crate::QrError;

/// Largest logo side, as a fraction of the symbol side.
const LOGO_SCALE: f32 = 0.4;

const DEFAULT_DIRECTORY: &str = "generated";

/*---- Encoding ----*/

/// Encodes `value` into a QR symbol at (at least) the given error-correction level.
///
/// # Errors
///
/// Returns [`QrError::DataTooLong`] if the text does not fit in a version 40 symbol.
///
/// # Example
///
/// ```rust
/// use qrforge::helper::encode;
/// use qrcodegen::QrCodeEcc;
///
/// let qr = encode("https://example.com", QrCodeEcc::Medium).unwrap();
/// assert!(qr.size() >= 21);
/// ```
pub fn encode(value: &str, ecc: QrCodeEcc) -> Result<QrCode, QrError> {
    let qr = QrCode::encode_text(value, ecc)?;
    debug!(
        bytes = value.len(),
        ?ecc,
        version = qr.version().value(),
        "encoded QR payload"
    );
    Ok(qr)
}

/*---- Layout ----*/

/// Pixel geometry of a symbol placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Modules per side.
    count: u32,
    /// Pixels per module.
    module: u32,
    /// Left/top pixel of module (0, 0).
    offset: u32,
    /// Canvas side in pixels.
    canvas: u32,
}

impl Layout {
    fn module_origin(&self, x: u32, y: u32) -> (u32, u32) {
        (self.offset + x * self.module, self.offset + y * self.module)
    }

    fn symbol_side(&self) -> u32 {
        self.count * self.module
    }
}

// The canvas grows past `style.size()` only when even one pixel per module would not fit.
fn layout(qr: &QrCode, style: &QrStyle) -> Layout {
    let count = qr.size() as u32;
    let margin = style.margin();
    let inner = style.size().saturating_sub(2 * margin);
    let module = (inner / count).max(1);
    let canvas = style.size().max(count * module + 2 * margin);
    let offset = (canvas - count * module) / 2;
    Layout {
        count,
        module,
        offset,
        canvas,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleRole {
    Dot,
    CornerSquare,
    CornerDot,
}

/// Classifies module `(x, y)` against the three 7x7 finder patterns.
fn module_role(count: i32, x: i32, y: i32) -> ModuleRole {
    for (ox, oy) in [(0, 0), (count - 7, 0), (0, count - 7)] {
        let (dx, dy) = (x - ox, y - oy);
        if (0..7).contains(&dx) && (0..7).contains(&dy) {
            return if (2..5).contains(&dx) && (2..5).contains(&dy) {
                ModuleRole::CornerDot
            } else {
                ModuleRole::CornerSquare
            };
        }
    }
    ModuleRole::Dot
}

fn paint(style: &QrStyle, role: ModuleRole) -> (ModuleShape, Color) {
    match role {
        ModuleRole::Dot => (style.dots.kind.shape(), style.dots.color),
        ModuleRole::CornerSquare => (style.corners_square.kind.shape(), style.corners_square.color),
        ModuleRole::CornerDot => (style.corners_dot.kind.shape(), style.corners_dot.color),
    }
}

/// Calls `f(x, y, shape, color)` for every dark module.
fn for_each_dark_module(qr: &QrCode, style: &QrStyle, mut f: impl FnMut(u32, u32, ModuleShape, Color)) {
    let size = qr.size();
    for y in 0..size {
        for x in 0..size {
            if qr.get_module(x, y) {
                let (shape, color) = paint(style, module_role(size, x, y));
                f(x as u32, y as u32, shape, color);
            }
        }
    }
}

/*---- Vector output ----*/

// Returns a string of SVG code for an image depicting the given QR Code, painted with `style`.
// The string always uses Unix newlines (\n), regardless of the platform. The logo is not embedded;
// use `generate_svg_string` for that.
pub fn to_svg_string(qr: &QrCode, style: &QrStyle) -> String {
    let mut result = svg_without_end_tag(qr, style);
    result += "</svg>\n";
    result
}

fn svg_without_end_tag(qr: &QrCode, style: &QrStyle) -> String {
    let layout = layout(qr, style);
    let canvas = layout.canvas;
    let side = layout.module;
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        canvas
    );
    result += &format!(
        "\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        style.background.color
    );
    for_each_dark_module(qr, style, |x, y, shape, color| {
        let (px, py) = layout.module_origin(x, y);
        result += &match shape {
            ModuleShape::Square => format!(
                "\t<rect x=\"{}\" y=\"{}\" width=\"{2}\" height=\"{2}\" fill=\"{3}\"/>\n",
                px, py, side, color
            ),
            ModuleShape::Circle => {
                let r = side as f32 / 2.0;
                format!(
                    "\t<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n",
                    px as f32 + r,
                    py as f32 + r,
                    r,
                    color
                )
            }
            ModuleShape::Rounded { radius } => format!(
                "\t<rect x=\"{}\" y=\"{}\" width=\"{2}\" height=\"{2}\" rx=\"{3}\" ry=\"{3}\" fill=\"{4}\"/>\n",
                px,
                py,
                side,
                radius * side as f32,
                color
            ),
        };
    });
    result
}

/// Embeds `logo` as a PNG data URI, centered on a `canvas`-sized document.
fn svg_logo_element(logo: &RgbaImage, canvas: u32) -> Result<String, QrError> {
    let mut png = Vec::new();
    logo.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    let (w, h) = logo.dimensions();
    Ok(format!(
        "\t<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" xlink:href=\"data:image/png;base64,{}\"/>\n",
        canvas.saturating_sub(w) / 2,
        canvas.saturating_sub(h) / 2,
        w,
        h,
        general_purpose::STANDARD.encode(&png)
    ))
}

/// Renders the QR code as block characters for a terminal, with `border` light modules around it.
pub fn to_ascii_string(qr: &QrCode, border: i32) -> String {
    let mut result = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c = if qr.get_module(x, y) { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}

/*---- Raster output ----*/

/// Paints the QR code onto an RGBA canvas. The logo is not applied here.
pub fn to_image_buffer(qr: &QrCode, style: &QrStyle) -> RgbaImage {
    let layout = layout(qr, style);
    let mut img = RgbaImage::from_pixel(layout.canvas, layout.canvas, style.background.color.to_rgba());
    let side = layout.module;

    for_each_dark_module(qr, style, |x, y, shape, color| {
        let (ox, oy) = layout.module_origin(x, y);
        let pixel = color.to_rgba();
        for py in 0..side {
            for px in 0..side {
                let fx = (px as f32 + 0.5) / side as f32;
                let fy = (py as f32 + 0.5) / side as f32;
                if shape.covers(fx, fy) {
                    img.put_pixel(ox + px, oy + py, pixel);
                }
            }
        }
    });

    img
}

/// Loads the logo at `path`, scaled so its longer side is `LOGO_SCALE` of the symbol side.
///
/// `None` when the file decodes to an empty image.
fn load_logo(path: &Path, style: &QrStyle, symbol_side: u32) -> Result<Option<RgbaImage>, QrError> {
    if style.error_correction_level < ErrorCorrectionLevel::Q {
        warn!(
            level = ?style.error_correction_level,
            "logo covers modules at a low error-correction level, the code may not scan"
        );
    }
    let logo = image::open(path)?.to_rgba8();
    let (w, h) = logo.dimensions();
    if w == 0 || h == 0 {
        warn!(path = %path.display(), "logo has no pixels, skipping");
        return Ok(None);
    }
    let max_side = (symbol_side as f32 * LOGO_SCALE).max(1.0);
    let scale = max_side / w.max(h) as f32;
    let target_w = ((w as f32 * scale).round() as u32).max(1);
    let target_h = ((h as f32 * scale).round() as u32).max(1);
    debug!(path = %path.display(), width = target_w, height = target_h, "loaded logo");
    Ok(Some(imageops::resize(&logo, target_w, target_h, FilterType::Lanczos3)))
}

/// Draws `logo` over the center of `img`.
fn overlay_logo(img: &mut RgbaImage, logo: &RgbaImage) {
    let x = (img.width().saturating_sub(logo.width()) / 2) as i64;
    let y = (img.height().saturating_sub(logo.height()) / 2) as i64;
    imageops::overlay(img, logo, x, y);
}

/// Generates a styled QR code image buffer from the provided content.
///
/// # Arguments
///
/// * `content` - The payload to encode, typically [`QrContent::render_value`](crate::content::QrContent::render_value).
/// * `style` - Colors, shapes, size, margin, error-correction level and optional logo.
///
/// # Errors
///
/// Fails if the content is too long or the logo cannot be read.
///
/// # Example
///
/// ```
/// use qrforge::helper::generate_image_buffer;
/// use qrforge::style::QrStyle;
///
/// let img = generate_image_buffer("Hello, World!", &QrStyle::default()).unwrap();
/// assert_eq!(img.dimensions(), (300, 300));
/// ```
pub fn generate_image_buffer(content: &str, style: &QrStyle) -> Result<RgbaImage, QrError> {
    let qr = encode(content, style.ecc())?;
    let mut img = to_image_buffer(&qr, style);
    if let Some(path) = &style.image {
        if let Some(logo) = load_logo(path, style, layout(&qr, style).symbol_side())? {
            overlay_logo(&mut img, &logo);
        }
    }
    Ok(img)
}

/// Generates a styled QR code as an SVG document.
///
/// A logo set in `style.image` is embedded as a centered PNG data URI, sized as in raster output.
///
/// # Errors
///
/// Fails if the content is too long or the logo cannot be read.
///
/// # Example
///
/// ```
/// use qrforge::helper::generate_svg_string;
/// use qrforge::style::QrStyle;
///
/// let svg = generate_svg_string("Hello, World!", &QrStyle::default()).unwrap();
/// assert!(svg.ends_with("</svg>\n"));
/// ```
pub fn generate_svg_string(content: &str, style: &QrStyle) -> Result<String, QrError> {
    let qr = encode(content, style.ecc())?;
    let mut result = svg_without_end_tag(&qr, style);
    if let Some(path) = &style.image {
        let layout = layout(&qr, style);
        if let Some(logo) = load_logo(path, style, layout.symbol_side())? {
            result += &svg_logo_element(&logo, layout.canvas)?;
        }
    }
    result += "</svg>\n";
    Ok(result)
}

/// Generates a styled QR code and encodes it as PNG bytes, ready for a clipboard or upload.
pub fn to_png_bytes(content: &str, style: &QrStyle) -> Result<Vec<u8>, QrError> {
    let img = generate_image_buffer(content, style)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Generates a styled QR code image and saves it as a PNG file.
///
/// # Arguments
///
/// * `content` - The content to encode into the QR Code.
/// * `style` - Rendering options.
/// * `directory` - Optional. The directory where the image will be saved. Defaults to "generated"
///   and is created if missing.
/// * `filename` - Optional. The file name, with or without the `.png` extension. Defaults to a
///   timestamp-based name.
///
/// Returns the path of the written file.
///
/// # Example
///
/// ```no_run
/// use qrforge::helper::generate_image;
/// use qrforge::style::QrStyle;
///
/// let path = generate_image("Hello, World!", &QrStyle::default(), Some("images"), Some("qr_code")).unwrap();
/// assert_eq!(path.to_str(), Some("images/qr_code.png"));
/// ```
pub fn generate_image(
    content: &str,
    style: &QrStyle,
    directory: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf, QrError> {
    let img = generate_image_buffer(content, style)?;

    let directory = Path::new(directory.unwrap_or(DEFAULT_DIRECTORY));
    let stem = match filename {
        Some(name) => name.strip_suffix(".png").unwrap_or(name).to_string(),
        None => {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            format!("qrforge-{}", millis)
        }
    };

    if !directory.exists() {
        fs::create_dir_all(directory)?;
    }
    let file_path = directory.join(format!("{}.png", stem));
    img.save(&file_path)?;
    debug!(path = %file_path.display(), "saved QR image");
    Ok(file_path)
}
