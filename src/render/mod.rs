//! Document assembly: configuration + tags + filtered sections -> one
//! narrative markdown guide, plus the structured payload around it.
//!
//! The configuration summary is derived from Configuration fields through a
//! fixed mapping, never from the tag set, so a tagging change cannot silently
//! alter what the merchant is told they selected.

use anyhow::anyhow;
use chrono::Local;
use serde::Serialize;

use crate::content::Library;
use crate::engine::{self, Complexity, SectionMatch};
use crate::form::{BusinessModel, Configuration, FraudTier, Timeline};

/// Output format for a generated guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The assembled narrative document.
    #[default]
    Markdown,
    /// The full structured payload (document + sections + complexity + tags).
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown output format: {s}")),
        }
    }
}

/// Generated guide plus the metadata callers display or export.
#[derive(Debug, Clone, Serialize)]
pub struct GuideOutput {
    pub markdown: String,
    pub sections: Vec<SectionSummary>,
    pub complexity: Complexity,
    pub tags: Vec<String>,
}

/// Identifier/title/tags triple for each included section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub id: u32,
    pub title: String,
    pub tags: Vec<String>,
}

/// Run the full pipeline for one configuration against a loaded library.
pub fn build_guide(library: &Library, config: &Configuration) -> GuideOutput {
    let tags = engine::map_tags(config);
    let complexity = engine::score(&tags, config);
    let matches = engine::filter_sections(&library.sections, &tags, config);

    let markdown = assemble(config, complexity, &matches);
    let sections = matches
        .iter()
        .map(|m| SectionSummary {
            id: m.section.id,
            title: m.section.title.clone(),
            tags: m.section.tags.clone(),
        })
        .collect();

    GuideOutput {
        markdown,
        sections,
        complexity,
        tags: tags.into_iter().collect(),
    }
}

/// Concatenate the guide document. Section order follows the match list,
/// which is already in positional order; headings are renumbered 1..n.
pub fn assemble(
    config: &Configuration,
    complexity: Complexity,
    matches: &[SectionMatch<'_>],
) -> String {
    let today = Local::now().format("%Y-%m-%d");
    let mut doc = String::new();

    // Header / identity block
    doc.push_str("# Payment Gateway Implementation Guide\n\n");
    doc.push_str(&format!("**Prepared for:** {}\n", config.merchant_name));
    doc.push_str(&format!("**Generated:** {today}\n\n---\n\n"));

    doc.push_str("## Welcome\n\n");
    doc.push_str(
        "This personalized implementation guide was created from your discovery \
         form responses. It contains only the sections relevant to your \
         configuration, so your team can focus on what matters for this \
         integration.\n\n",
    );

    doc.push_str(&format!(
        "### Implementation Complexity: {}\n\n{}\n\n",
        complexity.as_str().to_uppercase(),
        complexity.description()
    ));

    // Configuration summary - from Configuration fields, not tags.
    doc.push_str("---\n\n## Your Configuration\n\n");
    for line in summary_lines(config) {
        doc.push_str(&format!("- {line}\n"));
    }
    doc.push('\n');

    // Filtered content, renumbered.
    doc.push_str("---\n\n## Implementation Guide\n\n");
    for (number, m) in matches.iter().enumerate() {
        doc.push_str(&format!("## {}. {}\n\n", number + 1, m.section.title));

        let display_tags: Vec<&str> = m
            .section
            .tags
            .iter()
            .map(String::as_str)
            .filter(|t| *t != "general" && *t != "general reference")
            .collect();
        if !display_tags.is_empty() {
            doc.push_str(&format!("*Relevant to: {}*\n\n", display_tags.join(", ")));
        }

        if !m.section.body.is_empty() {
            doc.push_str(&m.section.body);
            doc.push_str("\n\n");
        }
        if let Some(reference) = &m.section.reference {
            doc.push_str(&format!("**Reference:** {reference}\n\n"));
        }
        for item in &m.items {
            doc.push_str(&format!("- [ ] {}\n", item.text));
            if let Some(reference) = &item.reference {
                doc.push_str(&format!("  - Reference: {reference}\n"));
            }
            if let Some(link) = &item.link {
                doc.push_str(&format!("  - Docs: {link}\n"));
            }
        }
        if !m.items.is_empty() {
            doc.push('\n');
        }
    }

    // Next steps and resources
    doc.push_str("---\n\n## Next Steps\n\n");
    doc.push_str(&next_steps(config, complexity));

    doc.push_str("\n---\n\n");
    doc.push_str(&format!(
        "*This guide was generated on {today} from your discovery form responses. \
         Review it with your implementation team and your gateway account \
         representative for current guidance.*\n"
    ));

    doc
}

/// One descriptive line per active feature, in fixed order.
fn summary_lines(config: &Configuration) -> Vec<String> {
    let mut lines = Vec::new();

    if config.business_model != BusinessModel::Unspecified {
        lines.push(format!(
            "**Business model:** {}",
            config.business_model.label()
        ));
    }

    match config.processing_timeline {
        Timeline::SameDay => lines.push(
            "**Same-day capture** - transactions authorized and captured immediately".into(),
        ),
        Timeline::MultiDay => {
            lines.push(
                "**Multi-day capture** - authorization and capture on different days".into(),
            );
            if config.needs_reauth {
                lines.push("**Reauthorization** required for expired authorizations".into());
            }
        }
        Timeline::Unspecified => {}
    }

    if config.partial_capture {
        lines.push("**Partial capture** - capture less than the authorized amount".into());
    }
    if config.over_capture {
        lines.push("**Over-capture** - capture up to 115% of the authorized amount".into());
    }
    if config.l2l3_processing {
        lines.push("**Level 2/3 data** enabled for reduced interchange rates".into());
    }

    if config.accept_ach {
        let mut features = Vec::new();
        if config.ach_network_check {
            features.push("Network Check");
        }
        if config.ach_recurring {
            features.push("Recurring");
        }
        if config.ach_realtime_status {
            features.push("Real-time Status");
        }
        let suffix = if features.is_empty() {
            String::new()
        } else {
            format!(" ({})", features.join(", "))
        };
        lines.push(format!("**ACH processing** enabled{suffix}"));
    }

    let mut methods = vec!["Credit/Debit Cards".to_string()];
    methods.extend(
        config
            .payment_methods
            .iter()
            .map(|m| payment_method_label(m).to_string()),
    );
    lines.push(format!("**Payment methods:** {}", methods.join(", ")));

    if !config.processing_channels.is_empty() {
        let channels: Vec<String> = config
            .processing_channels
            .iter()
            .map(|c| channel_label(c, config.ecommerce_platform.as_deref()))
            .collect();
        lines.push(format!("**Processing channels:** {}", channels.join(", ")));
    }

    match config.fraud_tier {
        FraudTier::Advanced => {
            lines.push("**Fraud Protection Advanced** (AI risk scoring) enabled".into())
        }
        FraudTier::Premium => lines.push("**Fraud Protection Premium** enabled".into()),
        FraudTier::Basic => lines.push("**Basic fraud management** (AVS/CVV rules)".into()),
    }

    if config.needs_3ds {
        lines.push("**3D Secure 2** enabled for SCA compliance".into());
    }

    if config.has_existing_vault && config.wants_migration {
        let detail = if config.migrate_data.is_empty() {
            String::new()
        } else {
            format!(" ({})", config.migrate_data.join(", "))
        };
        lines.push(format!(
            "**Data migration** required from existing processor{detail}"
        ));
    }

    lines
}

fn payment_method_label(method: &str) -> &str {
    match method {
        "paypal" => "PayPal",
        "apple-pay" => "Apple Pay",
        "google-pay" => "Google Pay",
        "venmo" => "Venmo",
        "bnpl" => "Buy Now Pay Later",
        other => other,
    }
}

fn channel_label(channel: &str, platform: Option<&str>) -> String {
    match channel {
        "storefront" => "Platform storefront".to_string(),
        "external-ecommerce" => match platform {
            Some(p) if p != "other" => format!("External e-commerce ({p})"),
            _ => "External e-commerce".to_string(),
        },
        "moto" => "Mail order / telephone order".to_string(),
        "payment-link" => "Pay-by-link".to_string(),
        other => other.to_string(),
    }
}

fn next_steps(config: &Configuration, complexity: Complexity) -> String {
    let mut steps = String::new();

    steps.push_str(&format!(
        "Based on your **{complexity}** configuration, your recommended next steps:\n\n"
    ));
    steps.push_str("1. **Review this guide** with your implementation team\n");
    steps.push_str("2. **Access the gateway control panel** to configure your merchant account\n");
    steps.push_str("3. **Install the gateway connector** for your commerce platform or ERP\n");
    steps.push_str("4. **Configure the payment processing profile**\n");

    // Inherited quirk: each conditional step below renders as step 5, so two
    // "5." lines appear when several conditions fire. Kept for output parity.
    if config.accept_ach {
        steps.push_str("5. **Set up ACH** in the gateway control panel\n");
    }
    if config.needs_3ds {
        steps.push_str("5. **Enable 3D Secure 2** for SCA compliance\n");
    }
    if complexity == Complexity::Complex {
        steps.push_str("5. **Schedule an implementation call** with the gateway technical team\n");
    }

    steps.push_str("6. **Test in the sandbox environment** before going live\n");
    steps.push_str("7. **Complete the go-live checklist** and validation\n\n");

    steps.push_str("### Key Resources\n\n");
    steps.push_str("- [PCI DSS document library](https://www.pcisecuritystandards.org/document_library/)\n");
    steps.push_str("- [EMV 3-D Secure specifications](https://www.emvco.com/emv-technologies/3-d-secure/)\n");
    steps.push_str("- [Nacha operating rules](https://www.nacha.org/rules) (ACH)\n");

    steps
}
