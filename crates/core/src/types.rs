//! Domain types for generated output sections and the documents feeding them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One labeled section of the generated output, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Resume,
    CoverLetter,
    AtsAnalysis,
    InterviewPrep,
}

impl Section {
    /// All sections in the order their markers are expected to appear.
    pub const ALL: [Section; 4] = [
        Section::Resume,
        Section::CoverLetter,
        Section::AtsAnalysis,
        Section::InterviewPrep,
    ];

    /// The literal marker that opens this section.
    pub fn marker(self) -> &'static str {
        match self {
            Section::Resume => "RESUME:",
            Section::CoverLetter => "COVER LETTER:",
            Section::AtsAnalysis => "ATS COMPATIBILITY ANALYSIS:",
            Section::InterviewPrep => "INTERVIEW PREPARATION:",
        }
    }

    /// The section whose marker closes this one, if any.
    pub fn next(self) -> Option<Section> {
        match self {
            Section::Resume => Some(Section::CoverLetter),
            Section::CoverLetter => Some(Section::AtsAnalysis),
            Section::AtsAnalysis => Some(Section::InterviewPrep),
            Section::InterviewPrep => None,
        }
    }

    /// Short identifier used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Section::Resume => "resume",
            Section::CoverLetter => "cover-letter",
            Section::AtsAnalysis => "ats",
            Section::InterviewPrep => "interview",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resume" => Ok(Section::Resume),
            "cover-letter" | "cover_letter" | "coverletter" => Ok(Section::CoverLetter),
            "ats" | "ats-analysis" | "ats_analysis" => Ok(Section::AtsAnalysis),
            "interview" | "interview-prep" | "interview_prep" => Ok(Section::InterviewPrep),
            other => Err(format!(
                "unknown section '{}' (expected resume, cover-letter, ats, interview)",
                other
            )),
        }
    }
}

/// Generated output split into its labeled sections.
///
/// A field is `None` when its marker was not found, and `Some("")` when the
/// marker was found but nothing followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutput {
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub ats_analysis: Option<String>,
    pub interview_prep: Option<String>,
}

impl ParsedOutput {
    /// Get a section by kind.
    pub fn get(&self, section: Section) -> Option<&str> {
        match section {
            Section::Resume => self.resume.as_deref(),
            Section::CoverLetter => self.cover_letter.as_deref(),
            Section::AtsAnalysis => self.ats_analysis.as_deref(),
            Section::InterviewPrep => self.interview_prep.as_deref(),
        }
    }

    pub(crate) fn set(&mut self, section: Section, value: Option<String>) {
        match section {
            Section::Resume => self.resume = value,
            Section::CoverLetter => self.cover_letter = value,
            Section::AtsAnalysis => self.ats_analysis = value,
            Section::InterviewPrep => self.interview_prep = value,
        }
    }

    /// The ATS analysis with any ```markdown fence unwrapped.
    pub fn ats_markdown(&self) -> Option<String> {
        self.ats_analysis
            .as_deref()
            .map(crate::sections::extract_fenced_markdown)
    }

    /// Sections whose markers were not found, in declared order.
    pub fn missing(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }

    /// Whether every section marker was found.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// The three inputs a resume optimization run needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub base_resume: String,
    pub base_cover_letter: String,
    pub job_description: String,
}

impl OptimizationRequest {
    pub fn new(
        base_resume: impl Into<String>,
        base_cover_letter: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Self {
        Self {
            base_resume: base_resume.into(),
            base_cover_letter: base_cover_letter.into(),
            job_description: job_description.into(),
        }
    }

    /// Whether all three inputs contain non-whitespace text.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Fail with the name of the first blank input.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base resume", &self.base_resume),
            ("base cover letter", &self.base_cover_letter),
            ("job description", &self.job_description),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::MissingInput(name));
            }
        }

        Ok(())
    }
}

/// The format of an uploaded source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// UTF-8 plain text.
    Text,
    /// Portable Document Format.
    Pdf,
    /// Word (Office Open XML) document.
    Docx,
}

impl DocumentFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    ///
    /// Plain text has no signature and is only ever detected by extension.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }

        // DOCX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Docx);
        }

        None
    }

    /// Detect from magic bytes first, then from the filename's extension.
    pub fn detect(bytes: &[u8], filename: &str) -> Result<Self> {
        Self::from_magic(bytes)
            .or_else(|| {
                filename
                    .rsplit_once('.')
                    .and_then(|(_, ext)| Self::from_extension(ext))
            })
            .ok_or_else(|| Error::UnsupportedFormat(filename.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}
