//! Validate reference/checklist content files before shipping them.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::content::Library;
use crate::error::OnrampError;

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Reference markdown to validate instead of the built-in content
    pub reference: Option<PathBuf>,
    /// Checklist JSON to validate instead of the built-in content
    pub checklist: Option<PathBuf>,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions, config: &Config) -> Result<()> {
    let reference = options.reference.or_else(|| config.reference.clone());
    let checklist = options.checklist.or_else(|| config.checklist.clone());

    match Library::load(reference.as_deref(), checklist.as_deref()) {
        Ok(library) => {
            let with_conditions = library
                .sections
                .iter()
                .filter(|s| s.visible_if.is_some())
                .count();
            println!(
                "{} Content is valid: {} sections, {} with visibility conditions",
                style("✓").green(),
                library.sections.len(),
                with_conditions
            );
            Ok(())
        }
        Err(OnrampError::Condition { expr, reason }) => {
            eprintln!(
                "{} Invalid visibility condition `{expr}`: {reason}",
                style("✗").red()
            );
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{} Content failed validation: {err}", style("✗").red());
            std::process::exit(1);
        }
    }
}
