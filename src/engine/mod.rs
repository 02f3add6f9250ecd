//! The filtering core: answers in, relevant content out.
//!
//! Pipeline: [`crate::form::Configuration`] -> [`tags::map_tags`] ->
//! ([`scoring::score`], [`filter::filter_sections`]). Every stage is a pure,
//! total function of the configuration; two invocations over the same input
//! produce identical output.

pub mod condition;
pub mod filter;
pub mod scoring;
pub mod tags;

pub use condition::evaluate;
pub use filter::{filter_sections, normalize_tag, SectionMatch, CORE_TAGS};
pub use scoring::{raw_score, score, Complexity, FEATURE_TAGS};
pub use tags::{map_tags, TagRule, TAG_RULES};
