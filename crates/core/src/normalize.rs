//! Cleanup for text pulled out of uploaded documents.
//!
//! PDF and DOCX extraction leave behind decomposed accents, carriage
//! returns, page-break form feeds, and trailing padding. None of that should
//! reach the section splitter or the bullet stripper.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Spaces and tabs at the end of a line.
static TRAILING_WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+$").unwrap());

/// Clean extracted document text.
///
/// - Composes Unicode to NFC
/// - Normalizes `\r\n`, `\r` and form feeds to `\n`
/// - Trims trailing spaces and tabs from each line
///
/// Leading indentation and blank lines are kept, since the bullet stripper
/// and the section headers depend on line structure.
pub fn clean_extracted_text(text: &str) -> String {
    let composed: String = text.nfc().collect();

    let unified = composed
        .replace("\r\n", "\n")
        .replace(['\r', '\u{000C}'], "\n");

    unified
        .split('\n')
        .map(|line| TRAILING_WHITESPACE_REGEX.replace(line, ""))
        .collect::<Vec<_>>()
        .join("\n")
}
