//! CLI command implementations.
//!
//! Each command lives in its own submodule with an `execute_*` entry point
//! and an options struct, mirroring the clap definitions in `main.rs`.

pub mod generate;
pub mod interview;
pub mod sections;
pub mod tags;
pub mod validate;

pub use generate::{execute_generate, GenerateOptions};
pub use interview::{execute_interview, InterviewOptions};
pub use sections::{execute_sections, SectionsOptions};
pub use tags::{execute_tags, TagsOptions};
pub use validate::{execute_validate, ValidateOptions};

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::config::Config;
use crate::content::Library;
use crate::form::Configuration;
use crate::render::{GuideOutput, OutputFormat};

/// Load the content library, honoring override paths from the tool config.
pub(crate) fn load_library(config: &Config) -> Result<Library> {
    Library::load(config.reference.as_deref(), config.checklist.as_deref())
        .context("failed to load reference content")
}

/// Read and normalize a raw submission from a file, or stdin when no path is
/// given.
pub(crate) fn read_submission(input: Option<&Path>) -> Result<Configuration> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read answers from stdin")?;
            buf
        }
    };
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("answers file is not valid JSON")?;
    Ok(Configuration::from_raw(&value))
}

/// Resolve the effective output format: CLI flag, then config default, then
/// markdown.
pub(crate) fn resolve_format(cli: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    if let Some(format) = cli {
        return Ok(format);
    }
    match &config.format {
        Some(name) => name.parse(),
        None => Ok(OutputFormat::Markdown),
    }
}

/// Write the guide to a file or stdout in the requested format.
pub(crate) fn emit_guide(
    guide: &GuideOutput,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Markdown => guide.markdown.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(guide)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} Wrote guide to {}", style("✓").green(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
