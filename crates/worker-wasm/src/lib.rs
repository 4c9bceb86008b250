//! WASM-compatible wrapper for resume document extraction and output
//! splitting.
//!
//! This crate exposes the extraction and section parsing functionality to
//! JavaScript for use in Cloudflare Workers.

use resume_core::{
    clean_extracted_text, strip_preamble, BulletStripper, DocumentFormat, Section,
    SectionSplitter,
};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of extracting an uploaded document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Detected format of the source file.
    pub format: String,
    /// Cleaned document text.
    pub text: String,
}

/// Generated output split for display.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    /// Resume with skills and experience bullets removed.
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    /// ATS analysis as generated, fence included.
    pub ats_analysis: Option<String>,
    /// ATS analysis with the markdown fence unwrapped, for rendering.
    pub ats_markdown: Option<String>,
    pub interview_prep: Option<String>,
    /// Names of the sections whose markers were not found.
    pub missing: Vec<String>,
}

/// Extract text from an uploaded resume, cover letter or job description.
///
/// # Arguments
/// * `data` - The raw bytes of the .txt, .pdf or .docx file
/// * `filename` - The original filename (used when magic bytes are inconclusive)
///
/// # Returns
/// A JavaScript object with the extraction result, or throws on error.
#[wasm_bindgen]
pub fn extract_document(data: &[u8], filename: &str) -> Result<JsValue, JsValue> {
    let result = extract_document_impl(data, filename).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn extract_document_impl(data: &[u8], filename: &str) -> Result<ExtractionResult, String> {
    let format = DocumentFormat::detect(data, filename).map_err(|e| e.to_string())?;

    let text = match format {
        DocumentFormat::Text => std::str::from_utf8(data)
            .map(str::to_string)
            .map_err(|e| format!("Text extraction error: not valid UTF-8: {}", e))?,
        DocumentFormat::Pdf => resume_pdf::PdfParser::new()
            .parse_bytes(data)
            .map_err(|e| e.to_string())?,
        DocumentFormat::Docx => resume_docx::DocxParser::new()
            .parse(Cursor::new(data))
            .map_err(|e| e.to_string())?,
    };

    Ok(ExtractionResult {
        format: format.as_str().to_string(),
        text: clean_extracted_text(&text),
    })
}

/// Split generated output into display sections.
///
/// # Arguments
/// * `raw` - The generator's complete response text
///
/// # Returns
/// A JavaScript object with one optional field per section.
#[wasm_bindgen]
pub fn parse_output(raw: &str) -> Result<JsValue, JsValue> {
    let result = parse_output_impl(raw);

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_output_impl(raw: &str) -> ParseResult {
    let parsed = SectionSplitter::new().split(strip_preamble(raw));

    ParseResult {
        resume: parsed
            .resume
            .as_deref()
            .map(|resume| BulletStripper::new().strip(resume)),
        ats_markdown: parsed.ats_markdown(),
        missing: parsed
            .missing()
            .into_iter()
            .map(|s: Section| s.name().to_string())
            .collect(),
        cover_letter: parsed.cover_letter,
        ats_analysis: parsed.ats_analysis,
        interview_prep: parsed.interview_prep,
    }
}

/// Remove bullets from the skills and experience sections of a resume.
#[wasm_bindgen]
pub fn strip_bullets(text: &str) -> String {
    BulletStripper::new().strip(text)
}
