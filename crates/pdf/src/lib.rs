//! PDF backend for document text extraction.

pub mod parser;

pub use parser::PdfParser;
