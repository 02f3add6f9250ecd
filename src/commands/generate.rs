//! Generate an onboarding guide from a saved questionnaire submission.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::engine;
use crate::render::{self, OutputFormat};

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Answers file (JSON); stdin when omitted
    pub input: Option<PathBuf>,
    /// Output file; stdout when omitted
    pub output: Option<PathBuf>,
    /// Output format override
    pub format: Option<OutputFormat>,
    /// Print the tag/score breakdown before the guide
    pub explain: bool,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions, config: &Config) -> Result<()> {
    let answers = super::read_submission(options.input.as_deref())?;

    if answers.merchant_name.trim().is_empty() {
        eprintln!(
            "{} Answers are missing a merchant name. Nothing to generate.",
            style("✗").red()
        );
        std::process::exit(1);
    }

    let library = super::load_library(config)?;
    let guide = render::build_guide(&library, &answers);

    if options.explain {
        let tags = engine::map_tags(&answers);
        let raw = engine::raw_score(&tags, &answers);
        eprintln!("{}", style("Tag mapping").bold());
        for tag in &guide.tags {
            eprintln!("  {tag}");
        }
        eprintln!();
        eprintln!(
            "{} {} (raw score {})",
            style("Complexity:").bold(),
            guide.complexity,
            raw
        );
        eprintln!(
            "{} {} of {}",
            style("Sections:").bold(),
            guide.sections.len(),
            library.sections.len()
        );
        for section in &guide.sections {
            eprintln!(
                "  {:>4}  {}  [{}]",
                section.id,
                section.title,
                section.tags.join(", ")
            );
        }
        eprintln!();
    }

    let format = super::resolve_format(options.format, config)?;
    super::emit_guide(&guide, format, options.output.as_deref())
}
