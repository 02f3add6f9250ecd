//! List the content library, optionally filtered by a saved submission.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::engine;

/// Options for the sections command
#[derive(Debug, Clone)]
pub struct SectionsOptions {
    /// Only list sections that match these answers (JSON file)
    pub matching: Option<PathBuf>,
    /// Show each section's tags
    pub show_tags: bool,
}

/// Execute the sections command
pub fn execute_sections(options: SectionsOptions, config: &Config) -> Result<()> {
    let library = super::load_library(config)?;

    match &options.matching {
        Some(path) => {
            let answers = super::read_submission(Some(path))?;
            let tags = engine::map_tags(&answers);
            let matches = engine::filter_sections(&library.sections, &tags, &answers);

            println!(
                "{} of {} sections match",
                style(matches.len()).bold(),
                library.sections.len()
            );
            println!();
            for m in &matches {
                print_section(m.section, options.show_tags);
                if !m.items.is_empty() {
                    println!("      {} checklist item(s)", m.items.len());
                }
            }
        }
        None => {
            println!("{} sections in library", style(library.sections.len()).bold());
            println!();
            for section in &library.sections {
                print_section(section, options.show_tags);
            }
        }
    }

    Ok(())
}

fn print_section(section: &crate::content::Section, show_tags: bool) {
    println!("{:>4}  {}", section.id, section.title);
    if show_tags && !section.tags.is_empty() {
        println!("      {}", style(section.tags.join(", ")).dim());
    }
}
