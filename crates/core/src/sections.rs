//! Splitting generated output into its labeled sections.
//!
//! The generator is asked to emit `RESUME:`, `COVER LETTER:`,
//! `ATS COMPATIBILITY ANALYSIS:` and `INTERVIEW PREPARATION:` blocks in that
//! order. Each section runs from the first occurrence of its marker to the
//! first following occurrence of the next marker, or to the end of the text
//! when no such marker follows. A marker that also appears inside a section
//! body will cut that section short; callers that need stricter boundaries
//! must get structured output from the generator instead.

use crate::types::{ParsedOutput, Section};

/// Opening fence of the markdown block inside the ATS analysis.
const MARKDOWN_FENCE: &str = "```markdown";

/// Any closing code fence.
const CLOSING_FENCE: &str = "```";

/// Splits raw generated text into a [`ParsedOutput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionSplitter;

impl SectionSplitter {
    /// Create a splitter for the standard four markers.
    pub fn new() -> Self {
        Self
    }

    /// Split the whole output into its four sections.
    pub fn split(&self, output: &str) -> ParsedOutput {
        let mut parsed = ParsedOutput::default();

        for section in Section::ALL {
            let value = self.section(output, section);
            if value.is_none() {
                log::debug!("Marker {:?} not found in output", section.marker());
            }
            parsed.set(section, value);
        }

        parsed
    }

    /// Extract a single section, trimmed.
    ///
    /// The section opens at the first occurrence of its marker and closes at
    /// the first occurrence of the next marker after that point, so a
    /// closing marker that appears earlier in the text is ignored.
    pub fn section(&self, output: &str, section: Section) -> Option<String> {
        let marker = section.marker();
        let start = output.find(marker)? + marker.len();

        let end = section
            .next()
            .and_then(|next| output[start..].find(next.marker()))
            .map_or(output.len(), |pos| start + pos);

        Some(output[start..end].trim().to_string())
    }
}

/// Unwrap the content of a ```markdown fenced block.
///
/// Returns the fenced content when an opening ```markdown fence is followed
/// by a closing fence; otherwise returns the text unchanged apart from
/// trimming.
pub fn extract_fenced_markdown(section: &str) -> String {
    if let Some((_, after_open)) = section.split_once(MARKDOWN_FENCE) {
        if let Some((inner, _)) = after_open.split_once(CLOSING_FENCE) {
            return inner.trim().to_string();
        }
    }

    section.trim().to_string()
}

/// Drop any introduction the generator wrote before the first `RESUME:`.
///
/// Text without a resume marker is returned untouched.
pub fn strip_preamble(output: &str) -> &str {
    match output.find(Section::Resume.marker()) {
        Some(pos) => &output[pos..],
        None => output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_OUTPUT: &str = "RESUME:\nJane Doe\nSKILLS\n- Rust\n\nCOVER LETTER:\nDear Hiring Manager,\n\nATS COMPATIBILITY ANALYSIS:\n```markdown\n## ATS Compatibility Analysis\n### Estimated ATS Passing Percentage: 88%\n```\n\nINTERVIEW PREPARATION:\n1. Talk about Rust\n";

    #[test]
    fn test_split_all_sections() {
        let parsed = SectionSplitter::new().split(FULL_OUTPUT);

        assert_eq!(parsed.resume.as_deref(), Some("Jane Doe\nSKILLS\n- Rust"));
        assert_eq!(parsed.cover_letter.as_deref(), Some("Dear Hiring Manager,"));
        assert_eq!(
            parsed.ats_analysis.as_deref(),
            Some("```markdown\n## ATS Compatibility Analysis\n### Estimated ATS Passing Percentage: 88%\n```")
        );
        assert_eq!(parsed.interview_prep.as_deref(), Some("1. Talk about Rust"));
        assert!(parsed.is_complete());
    }

    #[test]
    fn test_rebuilt_output_splits_identically() {
        let splitter = SectionSplitter::new();
        let parsed = splitter.split(FULL_OUTPUT);

        let rebuilt = Section::ALL
            .into_iter()
            .map(|s| format!("{}{}", s.marker(), parsed.get(s).unwrap_or_default()))
            .collect::<String>();

        assert_eq!(splitter.split(&rebuilt), parsed);
    }

    #[test]
    fn test_missing_interview_marker_extends_ats_to_end() {
        let output = "RESUME: r\nCOVER LETTER: c\nATS COMPATIBILITY ANALYSIS:\nScore 70%\nKeep going";
        let parsed = SectionSplitter::new().split(output);

        assert_eq!(parsed.interview_prep, None);
        assert_eq!(parsed.ats_analysis.as_deref(), Some("Score 70%\nKeep going"));
        assert_eq!(parsed.missing(), vec![Section::InterviewPrep]);
    }

    #[test]
    fn test_absent_marker_is_none_not_empty() {
        let parsed = SectionSplitter::new().split("RESUME:\nCOVER LETTER:\n");

        assert_eq!(parsed.resume.as_deref(), Some(""));
        assert_eq!(parsed.cover_letter.as_deref(), Some(""));
        assert_eq!(parsed.ats_analysis, None);
        assert_eq!(parsed.interview_prep, None);
    }

    #[test]
    fn test_no_markers() {
        let parsed = SectionSplitter::new().split("I could not complete this request.");
        assert_eq!(parsed, ParsedOutput::default());
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let parsed = SectionSplitter::new().split("resume: lower\nCover Letter: mixed");
        assert_eq!(parsed.resume, None);
        assert_eq!(parsed.cover_letter, None);
    }

    #[test]
    fn test_closing_marker_before_opening_is_ignored() {
        let output = "COVER LETTER: early\nRESUME: real resume\nCOVER LETTER: real letter";
        let parsed = SectionSplitter::new().split(output);

        assert_eq!(parsed.resume.as_deref(), Some("real resume"));
        // The cover letter opens at its first marker and runs to the end.
        assert_eq!(
            parsed.cover_letter.as_deref(),
            Some("early\nRESUME: real resume\nCOVER LETTER: real letter")
        );
    }

    #[test]
    fn test_later_marker_mentioned_in_earlier_section() {
        let output = "RESUME: Scored well on ATS COMPATIBILITY ANALYSIS: tools\nCOVER LETTER: Dear team\nATS COMPATIBILITY ANALYSIS: 85%";
        let parsed = SectionSplitter::new().split(output);

        assert_eq!(parsed.cover_letter.as_deref(), Some("Dear team"));
        // The ATS section opens at the mention inside the resume.
        assert_eq!(
            parsed.ats_analysis.as_deref(),
            Some("tools\nCOVER LETTER: Dear team\nATS COMPATIBILITY ANALYSIS: 85%")
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let output = "RESUME: one\nCOVER LETTER: two\nRESUME: three\nCOVER LETTER: four";
        let parsed = SectionSplitter::new().split(output);

        assert_eq!(parsed.resume.as_deref(), Some("one"));
        assert_eq!(
            parsed.cover_letter.as_deref(),
            Some("two\nRESUME: three\nCOVER LETTER: four")
        );
    }

    #[test]
    fn test_fenced_markdown_extraction() {
        assert_eq!(extract_fenced_markdown("```markdown\nfoo\n```"), "foo");
        assert_eq!(
            extract_fenced_markdown("Intro\n```markdown\n## Score\n* item\n```\ntrailing"),
            "## Score\n* item"
        );
    }

    #[test]
    fn test_fenced_markdown_without_fence_is_trimmed_only() {
        assert_eq!(extract_fenced_markdown("  ## Score: 80%\n"), "## Score: 80%");
    }

    #[test]
    fn test_unclosed_fence_returns_section() {
        let section = "```markdown\n## Score: 80%";
        assert_eq!(extract_fenced_markdown(section), section);
    }

    #[test]
    fn test_ats_markdown_on_parsed_output() {
        let parsed = SectionSplitter::new().split(FULL_OUTPUT);
        assert_eq!(
            parsed.ats_markdown().as_deref(),
            Some("## ATS Compatibility Analysis\n### Estimated ATS Passing Percentage: 88%")
        );
        assert_eq!(ParsedOutput::default().ats_markdown(), None);
    }

    #[test]
    fn test_strip_preamble() {
        assert_eq!(
            strip_preamble("Sure! Here is your material.\n\nRESUME:\nJane"),
            "RESUME:\nJane"
        );
        assert_eq!(strip_preamble("no markers here"), "no markers here");
    }
}
