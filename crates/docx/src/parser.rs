//! DOCX file parser implementation.

use quick_xml::events::Event;
use quick_xml::Reader;
use resume_core::{Error, Result};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Path of the main document part inside the archive.
const DOCUMENT_PART: &str = "word/document.xml";

/// Parser for DOCX (Office Open XML) files.
#[derive(Debug, Clone, Default)]
pub struct DocxParser {
    /// Whether paragraphs inside tables are extracted.
    include_tables: bool,
}

impl DocxParser {
    /// Create a new DOCX parser that reads body paragraphs only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether paragraphs inside tables are extracted too.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Parse a DOCX file from a reader, returning its text with one line per
    /// paragraph.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<String> {
        Ok(self.parse_paragraphs(reader)?.join("\n"))
    }

    /// Parse a DOCX file from a reader into its paragraphs, in document order.
    pub fn parse_paragraphs<R: Read + Seek>(&self, reader: R) -> Result<Vec<String>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let content = self.read_file_from_archive(&mut archive, DOCUMENT_PART)?;
        let paragraphs = self.extract_paragraphs_from_xml(&content)?;

        log::debug!("Extracted {} paragraphs from DOCX", paragraphs.len());

        Ok(paragraphs)
    }

    /// Extract paragraph text from the main document XML.
    ///
    /// Only text in `w:t` runs is kept; field codes and deleted text are
    /// skipped. Paragraphs nested in text boxes are ignored.
    fn extract_paragraphs_from_xml(&self, xml_content: &str) -> Result<Vec<String>> {
        let mut paragraphs = Vec::new();
        let mut reader = Reader::from_str(xml_content);

        let mut table_depth = 0usize;
        let mut paragraph_depth = 0usize;
        let mut in_run = false;
        let mut in_text = false;
        let mut current_text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = e.name();

                    match local_name(name.as_ref()) {
                        b"tbl" => table_depth += 1,
                        b"p" => {
                            paragraph_depth += 1;
                            if paragraph_depth == 1 {
                                current_text.clear();
                            }
                        }
                        b"r" if paragraph_depth == 1 => in_run = true,
                        b"t" if in_run => in_text = true,
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = e.name();

                    match local_name(name.as_ref()) {
                        b"p" if paragraph_depth == 0 && self.keeps(table_depth) => {
                            paragraphs.push(String::new());
                        }
                        b"tab" if in_run => current_text.push('\t'),
                        b"br" | b"cr" if in_run => current_text.push('\n'),
                        _ => {}
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if in_text {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::XmlError(format!("Bad text content: {}", e)))?;
                        current_text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.name();

                    match local_name(name.as_ref()) {
                        b"tbl" => table_depth = table_depth.saturating_sub(1),
                        b"p" => {
                            if paragraph_depth == 1 && self.keeps(table_depth) {
                                paragraphs.push(std::mem::take(&mut current_text));
                            }
                            paragraph_depth = paragraph_depth.saturating_sub(1);
                        }
                        b"r" if paragraph_depth == 1 => in_run = false,
                        b"t" => in_text = false,
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing document at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }

    fn keeps(&self, table_depth: usize) -> bool {
        table_depth == 0 || self.include_tables
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive.by_name(path).map_err(|e| {
            Error::DocxParseError(format!("File not found in archive '{}': {}", path, e))
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p>
      <w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
      <w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r>
    </w:p>
    <w:p/>
    <w:p><w:r><w:t>SKILLS</w:t></w:r></w:p>
    <w:p><w:r><w:t>•</w:t><w:tab/><w:t>Rust &amp; Go</w:t></w:r></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell text</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
    <w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two</w:t></w:r></w:p>
    <w:p><w:r><w:instrText>PAGE</w:instrText></w:r></w:p>
  </w:body>
</w:document>"#;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_body_paragraphs() {
        let paragraphs = DocxParser::new()
            .extract_paragraphs_from_xml(DOCUMENT_XML)
            .unwrap();

        assert_eq!(
            paragraphs,
            vec![
                "Jane Doe",
                "",
                "SKILLS",
                "•\tRust & Go",
                "Line one\nLine two",
                "",
            ]
        );
    }

    #[test]
    fn test_extract_with_tables() {
        let paragraphs = DocxParser::new()
            .with_tables(true)
            .extract_paragraphs_from_xml(DOCUMENT_XML)
            .unwrap();

        assert!(paragraphs.contains(&"Cell text".to_string()));
    }

    #[test]
    fn test_parse_archive() {
        let bytes = docx_bytes(DOCUMENT_XML);
        let text = DocxParser::new().parse(Cursor::new(bytes)).unwrap();

        assert!(text.starts_with("Jane Doe\n\nSKILLS\n•\tRust & Go\n"));
    }

    #[test]
    fn test_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", FileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = DocxParser::new().parse(Cursor::new(bytes));
        assert!(matches!(result, Err(Error::DocxParseError(_))));
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxParser::new().parse(Cursor::new(b"plain text".to_vec()));
        assert!(matches!(result, Err(Error::ZipError(_))));
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"w:p"), b"p");
        assert_eq!(local_name(b"w:t"), b"t");
        assert_eq!(local_name(b"p"), b"p");
    }
}
