//! PDF text extraction.

use resume_core::{Error, Result};

/// Parser for PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse an in-memory PDF, returning the text of all pages.
    ///
    /// The text always ends with a newline so documents can be concatenated
    /// without running their last and first lines together.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<String> {
        if !bytes.starts_with(b"%PDF") {
            return Err(Error::PdfParseError("Missing %PDF header".to_string()));
        }

        let mut text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::PdfParseError(e.to_string()))?;

        log::debug!("Extracted {} bytes of text from PDF", text.len());

        if !text.ends_with('\n') {
            text.push('\n');
        }

        Ok(text)
    }
}
