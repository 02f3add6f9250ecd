//! Show the tag mapping and complexity classification for a submission
//! without generating the full guide.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::engine;

/// Options for the tags command
#[derive(Debug, Clone)]
pub struct TagsOptions {
    /// Answers file (JSON); stdin when omitted
    pub input: Option<PathBuf>,
    /// Emit JSON instead of the human listing
    pub json: bool,
}

/// Execute the tags command
pub fn execute_tags(options: TagsOptions, _config: &Config) -> Result<()> {
    let answers = super::read_submission(options.input.as_deref())?;
    let tags = engine::map_tags(&answers);
    let raw = engine::raw_score(&tags, &answers);
    let tier = engine::score(&tags, &answers);

    if options.json {
        let payload = serde_json::json!({
            "tags": tags.iter().collect::<Vec<_>>(),
            "rawScore": raw,
            "complexity": tier,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", style("Mapped tags").bold());
    for tag in &tags {
        let feature = engine::FEATURE_TAGS.contains(&tag.as_str());
        if feature {
            println!("  {} {}", tag, style("(scored)").dim());
        } else {
            println!("  {tag}");
        }
    }
    println!();
    println!(
        "{} {} (raw score {})",
        style("Complexity:").bold(),
        tier,
        raw
    );

    Ok(())
}
