//! Bullet removal for the Skills and Experience parts of a resume.
//!
//! Lines are walked in order with a two-state machine. Skills and
//! experience headers switch bullet stripping on, other well-known resume
//! headers switch it off, and every other line keeps the current state.

use regex::Regex;
use std::sync::LazyLock;

/// Headers that open a section whose bullets are removed.
static SKILLS_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:SKILLS|TECHNICAL SKILLS|EXPERTISE|CORE COMPETENCIES|KEY SKILLS)")
        .unwrap()
});

static EXPERIENCE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:EXPERIENCE|WORK EXPERIENCE|PROFESSIONAL EXPERIENCE|EMPLOYMENT HISTORY)",
    )
    .unwrap()
});

/// Headers that close a skills or experience section.
static OTHER_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:EDUCATION|PROJECTS|ACHIEVEMENTS|CERTIFICATIONS|LANGUAGES|INTERESTS)")
        .unwrap()
});

/// Leading whitespace, bullet glyphs, and the whitespace after them.
///
/// Repeated runs are consumed in one pass so `- * item` and `• • item`
/// come out the same as `- item`.
static BULLET_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s*[•\-*+◦◘○◙♦❖⬧➢➤➔➧►❯❱]+)+\s*").unwrap()
});

/// Where the stripper currently is in the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    /// Lines are emitted unchanged.
    #[default]
    Outside,
    /// Lines lose their leading bullet glyphs.
    InSkillsOrExperience,
}

/// Removes bullet glyphs from lines under Skills and Experience headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletStripper;

impl BulletStripper {
    pub fn new() -> Self {
        Self
    }

    /// Classify a line as a section header.
    ///
    /// Returns the state the header switches to, or `None` for a body line.
    /// Matching is case-insensitive against the start of the trimmed line,
    /// so "Skills & Tools" counts as a skills header.
    pub fn classify(&self, line: &str) -> Option<SectionState> {
        let trimmed = line.trim();

        if SKILLS_HEADER_REGEX.is_match(trimmed) || EXPERIENCE_HEADER_REGEX.is_match(trimmed) {
            Some(SectionState::InSkillsOrExperience)
        } else if OTHER_HEADER_REGEX.is_match(trimmed) {
            Some(SectionState::Outside)
        } else {
            None
        }
    }

    /// Strip bullets from the skills and experience sections of `resume`.
    ///
    /// Line count and order are preserved; only `\n` is treated as a line
    /// separator.
    pub fn strip(&self, resume: &str) -> String {
        if resume.is_empty() {
            return String::new();
        }

        let mut state = SectionState::Outside;
        let mut stripped_lines = 0usize;

        let lines: Vec<String> = resume
            .split('\n')
            .map(|line| {
                if let Some(next) = self.classify(line) {
                    state = next;
                    return line.to_string();
                }

                match state {
                    SectionState::Outside => line.to_string(),
                    SectionState::InSkillsOrExperience => {
                        let stripped = BULLET_PREFIX_REGEX.replace(line, "");
                        if stripped.len() != line.len() {
                            stripped_lines += 1;
                        }
                        stripped.into_owned()
                    }
                }
            })
            .collect();

        log::debug!("Stripped bullets from {} resume lines", stripped_lines);

        lines.join("\n")
    }
}

/// Strip bullets using the default [`BulletStripper`].
pub fn remove_bullet_points(resume: &str) -> String {
    BulletStripper::new().strip(resume)
}
