//! Parser for the tagged reference guide.
//!
//! The format is plain markdown where every `##` heading starts a section and
//! a `**Tags:** `tag` `tag`` line (before or after the heading) attaches its
//! tags. Deeper headings (`###`) stay inside the section body. Tag lines are
//! consumed, never rendered.

use regex::Regex;
use std::sync::OnceLock;

use super::Section;
use crate::error::{OnrampError, Result};

fn tags_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\*\*Tags:\*\*\s*(.+)$").expect("valid regex"))
}

fn backtick_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid regex"))
}

/// Split a reference document into tagged sections, assigning positional ids
/// starting at `first_id`.
pub fn parse_reference(content: &str, first_id: u32) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;
    let mut body: Vec<&str> = Vec::new();
    let mut pending_tags: Vec<String> = Vec::new();
    let mut next_id = first_id;

    let finish = |section: Option<Section>, body: &mut Vec<&str>, out: &mut Vec<Section>| {
        if let Some(mut section) = section {
            section.body = collapse_blank_runs(body.join("\n").trim());
            out.push(section);
        }
        body.clear();
    };

    for line in content.lines() {
        if let Some(captures) = tags_line_re().captures(line) {
            let tags = extract_tags(&captures[1]);
            match current.as_mut() {
                Some(section) => section.tags.extend(tags),
                None => pending_tags.extend(tags),
            }
            continue;
        }

        if let Some(title) = heading(line) {
            finish(current.take(), &mut body, &mut sections);
            current = Some(Section {
                id: next_id,
                title: title.to_string(),
                tags: std::mem::take(&mut pending_tags),
                ..Default::default()
            });
            next_id += 1;
            continue;
        }

        if current.is_some() {
            body.push(line);
        }
    }
    finish(current.take(), &mut body, &mut sections);

    if sections.is_empty() {
        return Err(OnrampError::Content(
            "reference guide contains no '##' sections".into(),
        ));
    }
    Ok(sections)
}

/// A `## Title` heading; `###` and deeper stay in the body.
fn heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("## ")?;
    let rest = rest.trim();
    if rest.is_empty() || rest.starts_with('#') {
        None
    } else {
        Some(rest)
    }
}

/// Tags appear backticked: `` **Tags:** `ach` `webhook` ``.
fn extract_tags(tag_line: &str) -> Vec<String> {
    backtick_re()
        .captures_iter(tag_line)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blanks = 0;
    for line in text.lines() {
        if line.trim().is_empty() {
            blanks += 1;
            if blanks > 1 {
                continue;
            }
        } else {
            blanks = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
# Top-level title is ignored

## Getting Started
**Tags:** `general` `prerequisites`

Welcome text.

### Sub-heading stays in body

More text.

## ACH Transfers
**Tags:** `ach` `webhook`

Bank transfer setup.
";

    #[test]
    fn test_sections_split_on_h2() {
        let sections = parse_reference(SAMPLE, 1).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Getting Started");
        assert_eq!(sections[1].title, "ACH Transfers");
        assert_eq!(sections[0].id, 1);
        assert_eq!(sections[1].id, 2);
    }

    #[test]
    fn test_tags_attached_and_stripped_from_body() {
        let sections = parse_reference(SAMPLE, 1).unwrap();
        assert_eq!(sections[0].tags, vec!["general", "prerequisites"]);
        assert_eq!(sections[1].tags, vec!["ach", "webhook"]);
        assert!(!sections[0].body.contains("**Tags:**"));
        assert!(sections[0].body.contains("### Sub-heading stays in body"));
    }

    #[test]
    fn test_tags_line_before_heading_applies_to_next_section() {
        let doc = "**Tags:** `core-setup`\n## Credentials\n\nBody.\n";
        let sections = parse_reference(doc, 5).unwrap();
        assert_eq!(sections[0].tags, vec!["core-setup"]);
        assert_eq!(sections[0].id, 5);
    }

    #[test]
    fn test_first_id_offset() {
        let sections = parse_reference(SAMPLE, 10).unwrap();
        assert_eq!(sections[0].id, 10);
        assert_eq!(sections[1].id, 11);
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(parse_reference("no headings here", 1).is_err());
    }

    #[test]
    fn test_blank_runs_collapse() {
        let doc = "## A\n**Tags:** `general`\nline\n\n\n\nline2\n";
        let sections = parse_reference(doc, 1).unwrap();
        assert_eq!(sections[0].body, "line\n\nline2");
    }
}
