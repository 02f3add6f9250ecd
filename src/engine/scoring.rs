//! Integration complexity scoring.
//!
//! A heuristic ordinal scale, not a model: count feature tags from a fixed
//! allowlist, add bonuses for breadth (payment methods, channels) and for a
//! few configuration combinations, then bucket into three tiers. The exact
//! boundary values are load-bearing for reproducibility; do not tune them
//! without updating the boundary tests.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::{Configuration, Timeline};

/// Tags that each add one point to the complexity score.
///
/// `3ds` and `3d-secure` are both listed even though they always appear
/// together, so a 3DS merchant gets two hits from this list. That
/// double-count is inherited policy, kept for output compatibility.
pub const FEATURE_TAGS: &[&str] = &[
    "partial-capture",
    "overcapture",
    "l2-l3",
    "3ds",
    "3d-secure",
    "fraud",
    "account-updater",
    "webhook",
    "reauthorization",
];

/// Ordinal classification of integration effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }

    /// Short description shown in the generated guide.
    pub fn description(self) -> &'static str {
        match self {
            Self::Simple => "Straightforward configuration with minimal dependencies",
            Self::Moderate => "Standard configuration with some additional features",
            Self::Complex => "Advanced setup requiring multiple integrations and features",
        }
    }

    fn from_score(score: u32) -> Self {
        if score <= 3 {
            Self::Simple
        } else if score <= 7 {
            Self::Moderate
        } else {
            Self::Complex
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the raw integer score. Exposed separately so `--explain` can show
/// the number behind the tier.
pub fn raw_score(tags: &BTreeSet<String>, config: &Configuration) -> u32 {
    let mut score = FEATURE_TAGS
        .iter()
        .filter(|tag| tags.contains(**tag))
        .count() as u32;

    score += breadth_bonus(config.payment_methods.len());
    score += breadth_bonus(config.processing_channels.len());

    if config.processing_timeline == Timeline::MultiDay && config.needs_reauth {
        score += 2;
    }
    if config.accept_ach {
        score += 1;
    }
    if config.needs_3ds {
        score += 1;
    }

    score
}

/// Classify a configuration: score <= 3 simple, <= 7 moderate, else complex.
pub fn score(tags: &BTreeSet<String>, config: &Configuration) -> Complexity {
    Complexity::from_score(raw_score(tags, config))
}

fn breadth_bonus(count: usize) -> u32 {
    if count > 2 {
        2
    } else if count > 1 {
        1
    } else {
        0
    }
}
