//! Error types for document extraction and request handling.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting documents or validating input.
///
/// Section splitting and bullet stripping never fail; only the I/O facing
/// parts of the workspace produce these.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to parse the DOCX document structure.
    #[error("DOCX parsing error: {0}")]
    DocxParseError(String),

    /// Failed to extract text from a PDF.
    #[error("PDF parsing error: {0}")]
    PdfParseError(String),

    /// Failed to turn document bytes into text.
    #[error("Text extraction error: {0}")]
    ExtractionError(String),

    /// ZIP archive error (for DOCX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for DOCX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A required input was empty or whitespace only.
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),
}
