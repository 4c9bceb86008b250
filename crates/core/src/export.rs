//! Downloadable text files built from generated output.
//!
//! One file holds the complete output and one file per section that was
//! found. The resume file has its skills and experience bullets removed.

use crate::bullets::BulletStripper;
use crate::sections::{strip_preamble, SectionSplitter};
use crate::types::Section;
use serde::{Deserialize, Serialize};

/// File name for the complete output.
pub const COMPLETE_OUTPUT_FILE: &str = "optimized_materials.txt";

/// A named text file ready to be written or offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// The section this file holds, or `None` for the complete output.
    pub section: Option<Section>,
    pub file_name: String,
    pub content: String,
}

impl Artifact {
    fn new(section: Option<Section>, file_name: &str, content: String) -> Self {
        Self {
            section,
            file_name: file_name.to_string(),
            content,
        }
    }
}

/// File name used for a section's artifact.
pub fn file_name_for(section: Section) -> &'static str {
    match section {
        Section::Resume => "optimized_resume.txt",
        Section::CoverLetter => "optimized_cover_letter.txt",
        Section::AtsAnalysis => "ats_analysis.txt",
        Section::InterviewPrep => "interview_preparation.txt",
    }
}

/// Builds export artifacts from raw generated output.
#[derive(Debug, Clone)]
pub struct ResultsExporter {
    /// Remove bullets from the resume's skills and experience sections.
    strip_bullets: bool,

    /// End every artifact with a newline.
    trailing_newline: bool,
}

impl Default for ResultsExporter {
    fn default() -> Self {
        Self {
            strip_bullets: true,
            trailing_newline: true,
        }
    }
}

impl ResultsExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether resume bullets are stripped.
    pub fn with_strip_bullets(mut self, strip: bool) -> Self {
        self.strip_bullets = strip;
        self
    }

    /// Set whether each artifact ends with a newline.
    pub fn with_trailing_newline(mut self, newline: bool) -> Self {
        self.trailing_newline = newline;
        self
    }

    /// Build the artifacts for `raw`.
    ///
    /// Any preamble before `RESUME:` is dropped first. The complete output
    /// always comes first; sections whose marker is absent produce nothing.
    pub fn export(&self, raw: &str) -> Vec<Artifact> {
        let output = strip_preamble(raw);
        let parsed = SectionSplitter::new().split(output);

        let mut artifacts = vec![Artifact::new(
            None,
            COMPLETE_OUTPUT_FILE,
            self.finish(output.trim()),
        )];

        for section in Section::ALL {
            let Some(text) = parsed.get(section) else {
                log::warn!("No {} section in output; skipping its file", section);
                continue;
            };

            let content = match section {
                Section::Resume if self.strip_bullets => BulletStripper::new().strip(text),
                _ => text.to_string(),
            };

            artifacts.push(Artifact::new(
                Some(section),
                file_name_for(section),
                self.finish(&content),
            ));
        }

        artifacts
    }

    fn finish(&self, content: &str) -> String {
        if self.trailing_newline && !content.is_empty() {
            format!("{}\n", content)
        } else {
            content.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = "Here you go!\nRESUME:\nSKILLS\n- Rust\nCOVER LETTER:\nDear team,\nATS COMPATIBILITY ANALYSIS:\n```markdown\nScore: 91%\n```\nINTERVIEW PREPARATION:\n1. Ownership";

    fn names(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.file_name.as_str()).collect()
    }

    #[test]
    fn test_export_all_sections() {
        let artifacts = ResultsExporter::new().export(OUTPUT);

        assert_eq!(
            names(&artifacts),
            vec![
                "optimized_materials.txt",
                "optimized_resume.txt",
                "optimized_cover_letter.txt",
                "ats_analysis.txt",
                "interview_preparation.txt",
            ]
        );
        assert!(artifacts[0].content.starts_with("RESUME:\n"));
        assert_eq!(artifacts[1].content, "SKILLS\nRust\n");
        assert_eq!(artifacts[2].content, "Dear team,\n");
        // The downloadable ATS file keeps its fence.
        assert_eq!(artifacts[3].content, "```markdown\nScore: 91%\n```\n");
        assert_eq!(artifacts[4].section, Some(Section::InterviewPrep));
    }

    #[test]
    fn test_export_skips_missing_sections() {
        let artifacts = ResultsExporter::new().export("RESUME:\nJane\nCOVER LETTER:\nHi");
        assert_eq!(
            names(&artifacts),
            vec![
                "optimized_materials.txt",
                "optimized_resume.txt",
                "optimized_cover_letter.txt",
            ]
        );
    }

    #[test]
    fn test_export_without_markers_keeps_complete_output() {
        let artifacts = ResultsExporter::new().export("The model refused.");
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].content, "The model refused.\n");
        assert_eq!(artifacts[0].section, None);
    }

    #[test]
    fn test_export_options() {
        let artifacts = ResultsExporter::new()
            .with_strip_bullets(false)
            .with_trailing_newline(false)
            .export(OUTPUT);

        assert_eq!(artifacts[1].content, "SKILLS\n- Rust");
        assert!(!artifacts[0].content.ends_with('\n'));
    }
}
