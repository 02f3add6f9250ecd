#![forbid(unsafe_code)]

//! # onramp
//!
//! Payment gateway onboarding guides from discovery questionnaire answers.
//!
//! A merchant fills out a discovery form; this library normalizes the raw
//! answers, maps them to capability tags, scores integration complexity, and
//! filters a tagged content library down to a personalized implementation
//! guide.
//!
//! ## Example
//!
//! ```rust,no_run
//! use onramp::{build_guide, Configuration, Library};
//!
//! fn main() -> anyhow::Result<()> {
//!     let raw = serde_json::json!({
//!         "merchantName": "Acme Outfitters",
//!         "acceptACH": "yes",
//!         "needs3ds": "yes",
//!     });
//!     let answers = Configuration::from_raw(&raw);
//!     let library = Library::builtin()?;
//!
//!     let guide = build_guide(&library, &answers);
//!     println!("{}", guide.markdown);
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod form;
pub mod render;

pub use config::Config;
pub use content::{ChecklistItem, Library, Section};
pub use engine::{filter_sections, map_tags, score, Complexity};
pub use error::{OnrampError, Result};
pub use form::Configuration;
pub use render::{build_guide, GuideOutput, OutputFormat};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
