//! Core types and text processing for resume optimization output:
//! section splitting, bullet stripping, and export artifacts.

pub mod bullets;
pub mod error;
pub mod export;
pub mod normalize;
pub mod sections;
pub mod types;

pub use bullets::{remove_bullet_points, BulletStripper, SectionState};
pub use error::{Error, Result};
pub use export::{Artifact, ResultsExporter};
pub use normalize::clean_extracted_text;
pub use sections::{extract_fenced_markdown, strip_preamble, SectionSplitter};
pub use types::{DocumentFormat, OptimizationRequest, ParsedOutput, Section};
