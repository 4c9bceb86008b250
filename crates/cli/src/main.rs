//! CLI tool for preparing resume optimization inputs and splitting the
//! generated output into its sections.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resume_core::{
    clean_extracted_text, strip_preamble, Artifact, BulletStripper, DocumentFormat,
    OptimizationRequest, ParsedOutput, ResultsExporter, Section, SectionSplitter,
};
use resume_docx::DocxParser;
use resume_pdf::PdfParser;
use serde::Serialize;
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Prepare resume optimization inputs and split generated output.
#[derive(Parser, Debug)]
#[command(name = "resume-sections")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text of resume or cover letter documents (.txt, .pdf, .docx)
    Extract {
        /// Input document(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Include paragraphs inside DOCX tables
        #[arg(long)]
        tables: bool,
    },

    /// Extract the three inputs of an optimization run and print them as JSON
    Bundle {
        /// Base resume document
        #[arg(long)]
        resume: PathBuf,

        /// Base cover letter document
        #[arg(long)]
        cover_letter: PathBuf,

        /// Job description document
        #[arg(long)]
        job: PathBuf,

        /// Include paragraphs inside DOCX tables
        #[arg(long)]
        tables: bool,
    },

    /// Split generated output into resume, cover letter, ATS analysis and
    /// interview preparation
    Split {
        /// Generated output file (default: stdin)
        input: Option<PathBuf>,

        /// Output directory for the section files (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the section files to stdout instead of writing them
        #[arg(short, long)]
        print: bool,

        /// Print the parsed sections as JSON
        #[arg(long, conflicts_with_all = ["print", "section"])]
        json: bool,

        /// Print only this section (resume, cover-letter, ats, interview)
        #[arg(short, long)]
        section: Option<Section>,

        /// Keep bullets in the resume's skills and experience sections
        #[arg(long)]
        keep_bullets: bool,
    },

    /// Remove bullets from the skills and experience sections of a resume
    Strip {
        /// Resume text file (default: stdin)
        input: Option<PathBuf>,
    },
}

/// JSON shape printed by `split --json`.
#[derive(Serialize)]
struct SplitReport {
    #[serde(flatten)]
    parsed: ParsedOutput,
    ats_markdown: Option<String>,
    missing: Vec<Section>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Extract { input, tables } => {
            let docx = DocxParser::new().with_tables(tables);
            let mut failed = 0usize;

            for input_path in &input {
                log::debug!("Processing: {}", input_path.display());

                match extract_document(input_path, &docx) {
                    Ok(text) => print!("{}", ensure_newline(&text)),
                    Err(e) => {
                        failed += 1;
                        eprintln!("Error processing {}: {:#}", input_path.display(), e);
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{} of {} documents could not be extracted", failed, input.len());
            }
        }
        Command::Bundle {
            resume,
            cover_letter,
            job,
            tables,
        } => {
            let docx = DocxParser::new().with_tables(tables);
            let request = OptimizationRequest::new(
                extract_document(&resume, &docx)?,
                extract_document(&cover_letter, &docx)?,
                extract_document(&job, &docx)?,
            );
            request.validate()?;

            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Split {
            input,
            output,
            print,
            json,
            section,
            keep_bullets,
        } => {
            let raw = read_input(input.as_deref())?;

            if json {
                let parsed = SectionSplitter::new().split(strip_preamble(&raw));
                warn_missing(&parsed);
                let report = SplitReport {
                    ats_markdown: parsed.ats_markdown(),
                    missing: parsed.missing(),
                    parsed,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if let Some(section) = section {
                let text = render_section(&raw, section, keep_bullets)?;
                print!("{}", ensure_newline(&text));
            } else {
                let artifacts = ResultsExporter::new()
                    .with_strip_bullets(!keep_bullets)
                    .export(&raw);

                if print {
                    for artifact in &artifacts {
                        println!("==> {} <==", artifact.file_name);
                        print!("{}", ensure_newline(&artifact.content));
                    }
                } else {
                    let dir = output.unwrap_or_else(|| PathBuf::from("."));
                    write_artifacts(&dir, &artifacts)?;
                }
            }
        }
        Command::Strip { input } => {
            let resume = read_input(input.as_deref())?;
            print!("{}", BulletStripper::new().strip(&resume));
        }
    }

    Ok(())
}

/// Extract and clean the text of one document.
fn extract_document(input_path: &Path, docx: &DocxParser) -> Result<String> {
    let bytes = std::fs::read(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let format = DocumentFormat::detect(&bytes, filename)?;

    let text = match format {
        DocumentFormat::Text => {
            log::debug!("Reading as plain text");
            String::from_utf8(bytes).map_err(|e| {
                resume_core::Error::ExtractionError(format!("{} is not valid UTF-8: {}", filename, e))
            })?
        }
        DocumentFormat::Pdf => {
            log::debug!("Parsing as PDF");
            PdfParser::new().parse_bytes(&bytes)?
        }
        DocumentFormat::Docx => {
            log::debug!("Parsing as DOCX");
            docx.parse(Cursor::new(bytes))?
        }
    };

    Ok(clean_extracted_text(&text))
}

/// Render one section for display.
///
/// The resume loses its skills and experience bullets unless asked to keep
/// them, and the ATS analysis is shown without its markdown fence.
fn render_section(raw: &str, section: Section, keep_bullets: bool) -> Result<String> {
    let parsed = SectionSplitter::new().split(strip_preamble(raw));

    let text = match section {
        Section::AtsAnalysis => parsed.ats_markdown(),
        Section::Resume if !keep_bullets => parsed
            .get(section)
            .map(|resume| BulletStripper::new().strip(resume)),
        _ => parsed.get(section).map(str::to_string),
    };

    text.with_context(|| format!("No {} section found in output", section))
}

fn warn_missing(parsed: &ParsedOutput) {
    for section in parsed.missing() {
        log::warn!("Marker {:?} not found in output", section.marker());
    }
}

/// Read a whole file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    let mut content = String::new();

    match path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?
                .read_to_string(&mut content)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
        }
    }

    Ok(content)
}

/// Write each artifact into `dir`, creating it if needed.
fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        write_output(&path, &artifact.content)?;
        log::info!("Written to: {}", path.display());
    }

    Ok(())
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

fn ensure_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}
