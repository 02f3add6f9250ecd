//! Static reference content: pre-authored sections and checklist items.
//!
//! Two assets ship embedded in the binary: a tagged reference guide
//! (markdown, one section per `##` heading with a `**Tags:**` line) and a
//! checklist file (JSON sections with visibility conditions and leaf items).
//! Both load into one [`Library`] of [`Section`]s at process start; the
//! parsed library is cached for the process lifetime and never mutated.
//! Malformed content is a fatal startup error, never deferred to request
//! time.

pub mod markdown;

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::engine::condition;
use crate::error::{OnrampError, Result};

const BUILTIN_REFERENCE: &str = include_str!("../../content/reference.md");
const BUILTIN_CHECKLIST: &str = include_str!("../../content/checklist.json");

static SHARED: OnceLock<Library> = OnceLock::new();

/// A pre-authored block of reference or checklist guidance.
///
/// `id` is positional, assigned at load time, and defines the stable output
/// order. Tags drive relevance filtering; `visible_if` is an optional
/// condition over the merchant configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    #[serde(skip)]
    pub id: u32,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub reference: Option<String>,
    pub visible_if: Option<String>,
    pub items: Vec<ChecklistItem>,
}

/// A leaf checklist entry under a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistItem {
    pub text: String,
    pub reference: Option<String>,
    pub link: Option<String>,
    pub visible_if: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChecklistFile {
    sections: Vec<Section>,
}

/// All loaded sections, read-only after construction.
#[derive(Debug, Clone)]
pub struct Library {
    pub sections: Vec<Section>,
}

impl Library {
    /// Load the embedded content assets.
    pub fn builtin() -> Result<Self> {
        Self::from_sources(BUILTIN_REFERENCE, BUILTIN_CHECKLIST)
    }

    /// Process-lifetime cached view of the built-in library. Parses once;
    /// concurrent readers share the same immutable data.
    pub fn shared() -> Result<&'static Library> {
        if let Some(library) = SHARED.get() {
            return Ok(library);
        }
        let library = Self::builtin()?;
        Ok(SHARED.get_or_init(|| library))
    }

    /// Load with optional file overrides for either asset.
    pub fn load(reference: Option<&Path>, checklist: Option<&Path>) -> Result<Self> {
        let reference_src = match reference {
            Some(path) => std::fs::read_to_string(path)?,
            None => BUILTIN_REFERENCE.to_string(),
        };
        let checklist_src = match checklist {
            Some(path) => std::fs::read_to_string(path)?,
            None => BUILTIN_CHECKLIST.to_string(),
        };
        Self::from_sources(&reference_src, &checklist_src)
    }

    /// Parse both assets into one ordered section list. Reference sections
    /// come first, checklist sections after, ids strictly ascending.
    pub fn from_sources(reference: &str, checklist: &str) -> Result<Self> {
        let mut sections = markdown::parse_reference(reference, 1)?;

        let file: ChecklistFile = serde_json::from_str(checklist)
            .map_err(|e| OnrampError::Content(format!("checklist JSON: {e}")))?;
        let next_id = sections.len() as u32 + 1;
        for (offset, mut section) in file.sections.into_iter().enumerate() {
            section.id = next_id + offset as u32;
            sections.push(section);
        }

        let library = Library { sections };
        library.validate()?;
        Ok(library)
    }

    /// Check structural invariants and every visibility expression. Run as
    /// part of loading so bad content fails the process at startup, not a
    /// request.
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(OnrampError::Content("no sections loaded".into()));
        }

        for section in &self.sections {
            if section.title.trim().is_empty() {
                return Err(OnrampError::Content(format!(
                    "section {} has an empty title",
                    section.id
                )));
            }
            if let Some(expr) = &section.visible_if {
                condition::check(expr).map_err(|e| OnrampError::Condition {
                    expr: expr.clone(),
                    reason: e.to_string(),
                })?;
            }
            for item in &section.items {
                if let Some(expr) = &item.visible_if {
                    condition::check(expr).map_err(|e| OnrampError::Condition {
                        expr: expr.clone(),
                        reason: e.to_string(),
                    })?;
                }
            }
        }
        Ok(())
    }
}
