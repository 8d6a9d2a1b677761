use thiserror::Error;

/// Errors raised while loading a style or rendering a QR code.
///
/// Payload formatting never fails and does not use this type.
#[derive(Debug, Error)]
pub enum QrError {
    /// The payload does not fit in a version 40 symbol at the requested error-correction level.
    #[error("payload too long for a QR code: {0}")]
    DataTooLong(#[from] qrcodegen::DataTooLong),

    #[error("invalid color {0:?}, expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("invalid style configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
