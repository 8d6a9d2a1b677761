//! # qrforge
//!
//! A Rust library for building the payloads of everyday QR codes and rendering them with custom
//! styling.
//!
//! `qrforge` turns structured form data (a URL, a Wi-Fi network, a contact card, ...) into the
//! exact text a phone's scanner expects, then hands that text to a QR encoder and paints the
//! result as an SVG document, an in-memory image buffer, PNG bytes or a PNG file.
//!
//! ## Features
//!
//! - Payloads for URL, text, Wi-Fi (`WIFI:`), email (`mailto:`), phone (`tel:`), SMS (`smsto:`)
//!   and vCard 3.0 content.
//! - Pure, infallible formatting: a missing required field yields an empty payload.
//! - Serde support for form records and styling, so both can come straight from JSON.
//! - Styling with colors, dot and corner shapes, margins, four error correction levels, and an
//!   optional centered logo.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrforge = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Format a Wi-Fi payload and render it:
//!
//! ```rust
//! use qrforge::content::QrContent;
//! use qrforge::helper::generate_svg_string;
//! use qrforge::payload::{WifiData, WifiEncryption};
//! use qrforge::style::QrStyle;
//!
//! let content = QrContent::from(WifiData {
//!     ssid: "Cafe;Upstairs".to_string(),
//!     password: Some("espresso".to_string()),
//!     encryption: WifiEncryption::Wpa,
//! });
//! assert_eq!(content.payload(), r"WIFI:T:WPA;S:Cafe\;Upstairs;P:espresso;H:true;");
//!
//! let svg = generate_svg_string(&content.render_value(), &QrStyle::default()).unwrap();
//! assert!(svg.contains("<svg"));
//! ```
//!
//! ## Modules
//!
//! - [`payload`]: Form records and the per-category payload formatters.
//! - [`content`]: A tagged union over all categories.
//! - [`style`]: Rendering configuration.
//! - [`helper`]: Encoding and rendering to SVG, images and files.

pub mod content;
mod error;
pub mod helper;
pub mod payload;
pub mod style;

pub use content::{ContentKind, QrContent};
pub use error::QrError;
pub use style::QrStyle;
