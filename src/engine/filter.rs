//! Section and checklist-item filtering.
//!
//! Sections are selected by tag intersection with the user's tag set; a core
//! allowlist forces always-relevant reference material in regardless of tags.
//! A pair of mutual-exclusion rules keeps channel-specific instructions from
//! cross-contaminating when a merchant picked only one integration style.
//! Item visibility inside an included section is a separate, independent
//! check against the configuration.

use std::collections::BTreeSet;

use crate::content::{ChecklistItem, Section};
use crate::engine::condition;
use crate::form::Configuration;

/// Tags whose presence makes a section always relevant.
pub const CORE_TAGS: &[&str] = &["general", "prerequisites", "admin", "core-setup", "reference"];

/// One channel-exclusion rule: when the user has `have` but not `missing`,
/// sections carrying any of the `exclude` tags are dropped - unless the
/// section also carries that rule's escape tag.
struct ChannelExclusion {
    have: &'static str,
    missing: &'static str,
    exclude: &'static [ExcludedTag],
}

struct ExcludedTag {
    tag: &'static str,
    unless: Option<&'static str>,
}

/// External-platform merchants should not see hosted-storefront content and
/// vice versa. SCA checkout content is storefront-specific unless explicitly
/// tagged for external platforms too.
const CHANNEL_EXCLUSIONS: &[ChannelExclusion] = &[
    ChannelExclusion {
        have: "external-platform",
        missing: "storefront",
        exclude: &[
            ExcludedTag { tag: "storefront", unless: None },
            ExcludedTag { tag: "sca", unless: Some("external-platform") },
        ],
    },
    ChannelExclusion {
        have: "storefront",
        missing: "external-platform",
        exclude: &[ExcludedTag {
            tag: "external-platform",
            unless: Some("storefront"),
        }],
    },
];

/// A section that survived filtering, with its visible items resolved.
#[derive(Debug)]
pub struct SectionMatch<'a> {
    pub section: &'a Section,
    pub items: Vec<&'a ChecklistItem>,
}

/// Canonical form for tag comparison: lowercase, hyphens as underscores.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace('-', "_")
}

/// Select the relevant sections for a tag set, in original positional order.
/// Total: malformed visibility expressions hide the section/item and log a
/// warning rather than failing the request.
pub fn filter_sections<'a>(
    sections: &'a [Section],
    user_tags: &BTreeSet<String>,
    config: &Configuration,
) -> Vec<SectionMatch<'a>> {
    let normalized_user: BTreeSet<String> = user_tags.iter().map(|t| normalize_tag(t)).collect();

    let mut matches: Vec<SectionMatch<'a>> = sections
        .iter()
        .filter(|section| is_relevant(section, &normalized_user))
        .filter(|section| section_visible(section, config))
        .map(|section| SectionMatch {
            section,
            items: visible_items(section, config),
        })
        .collect();

    // Content loads in id order already; keep the contract explicit.
    matches.sort_by_key(|m| m.section.id);
    matches
}

fn is_relevant(section: &Section, normalized_user: &BTreeSet<String>) -> bool {
    // Untagged sections are unconditional; only a visibility expression can
    // gate them.
    if section.tags.is_empty() {
        return true;
    }

    // Core sections are always in and immune to channel exclusion.
    if section
        .tags
        .iter()
        .any(|t| CORE_TAGS.contains(&t.to_lowercase().as_str()))
    {
        return true;
    }

    let section_tags: BTreeSet<String> = section.tags.iter().map(|t| normalize_tag(t)).collect();

    // Channel exclusion wins over any unrelated tag match.
    for rule in CHANNEL_EXCLUSIONS {
        let have = normalized_user.contains(&normalize_tag(rule.have));
        let missing = !normalized_user.contains(&normalize_tag(rule.missing));
        if !(have && missing) {
            continue;
        }
        for excluded in rule.exclude {
            if section_tags.contains(&normalize_tag(excluded.tag)) {
                let escaped = excluded
                    .unless
                    .map(|t| section_tags.contains(&normalize_tag(t)))
                    .unwrap_or(false);
                if !escaped {
                    return false;
                }
            }
        }
    }

    section_tags.iter().any(|t| normalized_user.contains(t))
}

fn section_visible(section: &Section, config: &Configuration) -> bool {
    match &section.visible_if {
        None => true,
        Some(expr) => condition::evaluate(expr, config).unwrap_or_else(|err| {
            tracing::warn!(section = %section.title, %err, "section condition failed, hiding");
            false
        }),
    }
}

fn visible_items<'a>(section: &'a Section, config: &Configuration) -> Vec<&'a ChecklistItem> {
    section
        .items
        .iter()
        .filter(|item| match &item.visible_if {
            None => true,
            Some(expr) => condition::evaluate(expr, config).unwrap_or_else(|err| {
                tracing::warn!(item = %item.text, %err, "item condition failed, hiding");
                false
            }),
        })
        .collect()
}
