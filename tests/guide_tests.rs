//! End-to-end pipeline tests: raw answers -> normalized configuration ->
//! tags -> complexity -> filtered sections -> assembled guide.

use std::collections::BTreeSet;

use onramp::engine::{self, normalize_tag};
use onramp::{build_guide, Complexity, Configuration, Library};
use serde_json::json;

fn library() -> Library {
    Library::builtin().expect("embedded content must parse")
}

fn guide(raw: serde_json::Value) -> onramp::GuideOutput {
    build_guide(&library(), &Configuration::from_raw(&raw))
}

// =============================================================================
// Minimal and baseline behavior
// =============================================================================

mod baseline_tests {
    use super::*;

    #[test]
    fn test_empty_answers_still_produce_a_guide() {
        let output = guide(json!({ "merchantName": "Plain Goods Co" }));

        assert!(output.markdown.contains("Plain Goods Co"));
        assert_eq!(output.complexity, Complexity::Simple);
        assert!(!output.sections.is_empty());

        // Core sections survive with no features selected.
        let titles: Vec<&str> = output.sections.iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"Before You Begin"));
        assert!(titles.contains(&"Sandbox Testing and Go-Live"));
    }

    #[test]
    fn test_unselected_features_are_absent() {
        let output = guide(json!({ "merchantName": "Plain Goods Co" }));
        let titles: Vec<&str> = output.sections.iter().map(|s| s.title.as_str()).collect();

        assert!(!titles.contains(&"ACH Bank Payments"));
        assert!(!titles.contains(&"3D Secure 2"));
        assert!(!titles.contains(&"Vault Data Migration"));
        // Timeline unanswered: no authorization strategy content yet.
        assert!(!titles.contains(&"Authorization and Capture Strategy"));
        assert!(!titles.contains(&"Authorization and Capture Checklist"));
    }

    #[test]
    fn test_feature_sections_carry_no_unconditional_tags() {
        // Tags from the always-on mapping rule match every configuration, so
        // a feature section carrying one leaks into every guide. Only the
        // sections meant for everyone may use them.
        let unconditional = [
            "credit-card",
            "payment-method-setup",
            "payment-operations",
            "sale",
            "capture",
            "refund",
            "tokenization",
            "vaulting",
        ];
        let intentionally_universal = [
            "Payment Method Configuration",
            "Card Processing Operations",
            "Tokenization and the Vault",
        ];

        for section in &library().sections {
            let is_core = section.tags.iter().any(|t| {
                onramp::engine::CORE_TAGS.contains(&t.to_lowercase().as_str())
            });
            if is_core || intentionally_universal.contains(&section.title.as_str()) {
                continue;
            }
            for tag in &section.tags {
                assert!(
                    !unconditional.contains(&tag.as_str()),
                    "feature section '{}' carries always-on tag '{}'",
                    section.title,
                    tag
                );
            }
        }
    }

    #[test]
    fn test_guide_is_deterministic() {
        let raw = json!({
            "merchantName": "Acme",
            "acceptACH": "yes",
            "paymentMethods": ["paypal", "venmo"],
        });
        let a = guide(raw.clone());
        let b = guide(raw);
        assert_eq!(a.markdown, b.markdown);
        assert_eq!(a.tags, b.tags);
        assert_eq!(a.complexity, b.complexity);
    }
}

// =============================================================================
// Feature selection pulls in the right content
// =============================================================================

mod selection_tests {
    use super::*;

    #[test]
    fn test_ach_pulls_setup_status_and_checklist() {
        let output = guide(json!({
            "merchantName": "Acme",
            "acceptACH": "yes",
            "achRealtimeStatus": "on",
        }));
        let titles: Vec<&str> = output.sections.iter().map(|s| s.title.as_str()).collect();

        assert!(titles.contains(&"ACH Bank Payments"));
        assert!(titles.contains(&"ACH Status and Returns"));
        assert!(titles.contains(&"ACH Setup Checklist"));
        // ACH implies webhooks via the tag mapping.
        assert!(titles.contains(&"Webhooks and Notifications"));
    }

    #[test]
    fn test_migration_requires_vault_and_intent() {
        let vault_only = guide(json!({
            "merchantName": "Acme",
            "hasExistingVault": "yes",
        }));
        let titles: Vec<&str> = vault_only.sections.iter().map(|s| s.title.as_str()).collect();
        assert!(!titles.contains(&"Vault Data Migration"));

        let both = guide(json!({
            "merchantName": "Acme",
            "hasExistingVault": "yes",
            "wantsMigration": "yes",
            "migrateData": ["cards", "customers"],
        }));
        let titles: Vec<&str> = both.sections.iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"Vault Data Migration"));
        assert!(titles.contains(&"Data Migration Checklist"));

        // Item visibility follows the migrated data kinds.
        assert!(both.markdown.contains("old-token to new-token mapping"));
        assert!(both.markdown.contains("customer profiles to ERP"));
        assert!(!both.markdown.contains("bank account records in the export scope"));
    }

    #[test]
    fn test_platform_specific_section_matches_dynamic_tag() {
        let output = guide(json!({
            "merchantName": "Acme",
            "processingChannels": ["external-ecommerce"],
            "ecommercePlatform": "shopify",
        }));
        let titles: Vec<&str> = output.sections.iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"Shopify Connector Notes"));
    }

    #[test]
    fn test_checklist_items_follow_timeline() {
        let output = guide(json!({
            "merchantName": "Acme",
            "processingTimeline": "multi-day",
            "needsReauth": "yes",
        }));

        assert!(output.markdown.contains("capture on fulfillment"));
        assert!(output.markdown.contains("Wire reauthorization into the fulfillment pipeline"));
        assert!(!output.markdown.contains("single-step capture"));
    }
}

// =============================================================================
// Channel mutual exclusion, end to end
// =============================================================================

mod channel_tests {
    use super::*;

    #[test]
    fn test_external_only_merchant_sees_no_storefront_content() {
        let output = guide(json!({
            "merchantName": "Acme",
            "processingChannels": ["external-ecommerce"],
        }));
        let titles: Vec<&str> = output.sections.iter().map(|s| s.title.as_str()).collect();

        assert!(titles.contains(&"External Platform Connector"));
        assert!(!titles.contains(&"Storefront Checkout"));
        // Storefront-only SCA content excluded; external SCA variant kept.
        assert!(!titles.contains(&"Strong Customer Authentication at Checkout"));
    }

    #[test]
    fn test_storefront_only_merchant_sees_no_connector_content() {
        let output = guide(json!({
            "merchantName": "Acme",
            "processingChannels": ["storefront"],
        }));
        let titles: Vec<&str> = output.sections.iter().map(|s| s.title.as_str()).collect();

        assert!(titles.contains(&"Storefront Checkout"));
        assert!(titles.contains(&"Strong Customer Authentication at Checkout"));
        assert!(!titles.contains(&"External Platform Connector"));
        assert!(!titles.contains(&"SCA on External Platforms"));
    }

    #[test]
    fn test_both_channels_see_both_sides() {
        let output = guide(json!({
            "merchantName": "Acme",
            "processingChannels": ["storefront", "external-ecommerce"],
        }));
        let titles: Vec<&str> = output.sections.iter().map(|s| s.title.as_str()).collect();

        assert!(titles.contains(&"Storefront Checkout"));
        assert!(titles.contains(&"External Platform Connector"));
    }
}

// =============================================================================
// Complexity classification on realistic submissions
// =============================================================================

mod complexity_tests {
    use super::*;

    #[test]
    fn test_full_featured_submission_is_complex() {
        let output = guide(json!({
            "merchantName": "Everything Inc",
            "businessModel": "hybrid",
            "processingTimeline": "multi-day",
            "needsReauth": "yes",
            "acceptACH": "yes",
            "needs3ds": "yes",
            "paymentMethods": ["paypal", "apple-pay", "venmo"],
            "processingChannels": ["storefront", "moto", "payment-link"],
        }));

        assert_eq!(output.complexity, Complexity::Complex);
        assert!(output
            .markdown
            .contains("Schedule an implementation call"));
    }

    #[test]
    fn test_moderate_submission() {
        let output = guide(json!({
            "merchantName": "Mid Co",
            "needs3ds": "yes",
        }));
        assert_eq!(output.complexity, Complexity::Moderate);
    }
}

// =============================================================================
// Output ordering and structure
// =============================================================================

mod structure_tests {
    use super::*;

    #[test]
    fn test_sections_keep_library_order_and_renumber() {
        let output = guide(json!({
            "merchantName": "Acme",
            "acceptACH": "yes",
            "needs3ds": "yes",
        }));

        // Summaries preserve ascending library ids.
        let ids: Vec<u32> = output.sections.iter().map(|s| s.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);

        // Headings are renumbered 1..n regardless of library ids.
        for n in 1..=output.sections.len().min(3) {
            assert!(output.markdown.contains(&format!("## {n}. ")));
        }
    }

    #[test]
    fn test_tag_normalization_is_symmetric() {
        assert_eq!(normalize_tag("L2-L3"), normalize_tag("l2_l3"));
        assert_eq!(normalize_tag("  3D-Secure "), "3d_secure");
    }

    #[test]
    fn test_every_mapped_tag_is_lowercase() {
        let config = Configuration::from_raw(&json!({
            "acceptACH": "yes",
            "needs3ds": "yes",
            "processingChannels": ["storefront", "external-ecommerce", "moto"],
            "paymentMethods": ["paypal", "apple-pay", "google-pay", "venmo", "bnpl"],
        }));
        let tags: BTreeSet<String> = engine::map_tags(&config);
        for tag in &tags {
            assert_eq!(tag, &tag.to_lowercase());
        }
    }
}
