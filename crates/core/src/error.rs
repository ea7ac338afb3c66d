//! Error types for deck template filling.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, filling or writing a deck.
///
/// Not-found conditions (a placeholder absent from a paragraph, a missing
/// image file, a slide without a picture) are not errors; the components
/// report them through their return values.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read an input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode a JSON document (configuration or data table).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The data table does not have the expected shape.
    #[error("Invalid data table: {0}")]
    InvalidData(String),

    /// A shape name the document model cannot hold.
    #[error("Invalid shape name: {0:?}")]
    InvalidShapeName(String),

    /// A color the target representation cannot express.
    #[error("Unsupported color: {0}")]
    UnsupportedColor(String),

    /// Failed to parse the PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),
}
