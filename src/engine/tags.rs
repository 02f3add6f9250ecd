//! Tag mapping: Configuration -> set of capability tags.
//!
//! A fixed, ordered table of (predicate, tags-to-add) rules keeps the mapping
//! auditable and testable apart from the content it selects. Rules union into
//! a set, so overlapping rules are idempotent and enabling a feature can only
//! ever add tags.

use std::collections::BTreeSet;

use crate::form::{BusinessModel, Configuration, FraudTier, Timeline};

/// One row of the mapping table.
pub struct TagRule {
    pub when: fn(&Configuration) -> bool,
    pub tags: &'static [&'static str],
}

/// The mapping table. Evaluated in order; every matching rule contributes its
/// tags.
pub const TAG_RULES: &[TagRule] = &[
    // Defaults every merchant gets: card processing, the standard operation
    // set, and stored payment methods.
    TagRule {
        when: |_| true,
        tags: &[
            "credit-card",
            "payment-method-setup",
            "payment-operations",
            "sale",
            "capture",
            "refund",
            "tokenization",
            "vaulting",
        ],
    },
    // Processing channels
    TagRule {
        when: |c| c.has_channel("storefront"),
        tags: &["storefront", "sca", "workflow"],
    },
    TagRule {
        when: |c| c.has_channel("external-ecommerce"),
        tags: &["external-ecommerce", "external-platform", "workflow", "api-connector"],
    },
    TagRule {
        when: |c| c.has_channel("external-ecommerce") && c.needs_order_sync,
        tags: &["record-external-event", "order-sync", "integration"],
    },
    TagRule {
        when: |c| c.has_channel("moto"),
        tags: &["moto", "back-office"],
    },
    TagRule {
        when: |c| c.has_channel("payment-link"),
        tags: &["payment-link"],
    },
    TagRule {
        when: |c| c.has_channel("prl"),
        tags: &["payment-request-link", "prl"],
    },
    // Subscription commerce
    TagRule {
        when: |c| c.business_model == BusinessModel::Saas || c.subscription_based,
        tags: &["recurring", "account-updater"],
    },
    // Authorization/capture strategy
    TagRule {
        when: |c| c.processing_timeline != Timeline::Unspecified,
        tags: &["authorization", "capture"],
    },
    TagRule {
        when: |c| c.processing_timeline == Timeline::MultiDay && c.needs_reauth,
        tags: &["reauthorization"],
    },
    // ACH and its sub-features
    TagRule {
        when: |c| c.accept_ach,
        tags: &["ach", "payment-method-setup", "webhook", "real-time-status"],
    },
    TagRule {
        when: |c| c.accept_ach && c.ach_recurring,
        tags: &["recurring"],
    },
    // Alternative payment methods
    TagRule {
        when: |c| c.has_payment_method("paypal"),
        tags: &["paypal", "external-checkout"],
    },
    TagRule {
        when: |c| c.has_payment_method("apple-pay"),
        tags: &["apple-pay", "digital-wallet"],
    },
    TagRule {
        when: |c| c.has_payment_method("google-pay"),
        tags: &["google-pay", "digital-wallet"],
    },
    TagRule {
        when: |c| c.has_payment_method("venmo"),
        tags: &["venmo", "digital-wallet"],
    },
    TagRule {
        when: |c| c.has_payment_method("bnpl"),
        tags: &["bnpl"],
    },
    // Capture adjustments and data features
    TagRule {
        when: |c| c.partial_capture,
        tags: &["partial-capture", "advanced"],
    },
    TagRule {
        when: |c| c.over_capture,
        tags: &["overcapture", "advanced"],
    },
    TagRule {
        when: |c| c.l2l3_processing,
        tags: &["l2-l3"],
    },
    TagRule {
        when: |c| c.needs_3ds,
        tags: &["3ds", "3d-secure"],
    },
    // Fraud: every merchant gets the baseline; advanced tier swaps AVS/CVV
    // guidance for the risk-scoring product.
    TagRule {
        when: |c| c.fraud_tier == FraudTier::Advanced,
        tags: &["fraud", "advanced"],
    },
    TagRule {
        when: |c| c.fraud_tier != FraudTier::Advanced,
        tags: &["fraud", "avs", "cvv"],
    },
    // Webhooks for anything that settles asynchronously
    TagRule {
        when: |c| c.realtime_updates || c.accept_ach,
        tags: &["webhook", "notifications"],
    },
    TagRule {
        when: |c| c.custom_descriptors,
        tags: &["descriptors"],
    },
    TagRule {
        when: |c| c.has_existing_vault && c.wants_migration,
        tags: &["data-migration"],
    },
];

/// Map a configuration to its tag set. Pure and total.
pub fn map_tags(config: &Configuration) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = BTreeSet::new();

    for rule in TAG_RULES {
        if (rule.when)(config) {
            tags.extend(rule.tags.iter().map(|t| t.to_string()));
        }
    }

    // External platform merchants also get a tag for their specific platform,
    // so platform-named content can match.
    if config.has_channel("external-ecommerce") {
        if let Some(platform) = &config.ecommerce_platform {
            if platform != "other" {
                tags.insert(platform.clone());
            }
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags_for(raw: serde_json::Value) -> BTreeSet<String> {
        map_tags(&Configuration::from_raw(&raw))
    }

    #[test]
    fn test_minimal_config_gets_baseline_tags() {
        let tags = tags_for(json!({}));
        for expected in [
            "credit-card",
            "payment-method-setup",
            "payment-operations",
            "sale",
            "capture",
            "refund",
            "tokenization",
            "vaulting",
            "fraud",
            "avs",
            "cvv",
        ] {
            assert!(tags.contains(expected), "missing baseline tag {expected}");
        }
        assert!(!tags.contains("ach"));
        assert!(!tags.contains("3ds"));
    }

    #[test]
    fn test_single_flag_is_superset_of_baseline() {
        let baseline = tags_for(json!({}));
        let with_ach = tags_for(json!({ "acceptACH": "yes" }));
        assert!(baseline.is_subset(&with_ach));
        assert!(with_ach.contains("ach"));
        assert!(with_ach.contains("webhook"));
        assert!(with_ach.contains("real-time-status"));
    }

    #[test]
    fn test_channel_implies_auxiliary_tags() {
        let tags = tags_for(json!({ "processingChannels": ["external-ecommerce"] }));
        assert!(tags.contains("external-ecommerce"));
        assert!(tags.contains("external-platform"));
        assert!(tags.contains("api-connector"));
        assert!(tags.contains("workflow"));
        assert!(!tags.contains("order-sync"));
    }

    #[test]
    fn test_order_sync_requires_external_channel() {
        let sync_only = tags_for(json!({ "needsOrderSync": "yes" }));
        assert!(!sync_only.contains("order-sync"));

        let both = tags_for(json!({
            "processingChannels": ["external-ecommerce"],
            "needsOrderSync": "yes",
        }));
        assert!(both.contains("order-sync"));
        assert!(both.contains("record-external-event"));
        assert!(both.contains("integration"));
    }

    #[test]
    fn test_recurring_ach_requires_both_fields() {
        let recurring_only = tags_for(json!({ "achRecurring": "on" }));
        assert!(!recurring_only.contains("recurring"));

        let both = tags_for(json!({ "acceptACH": "yes", "achRecurring": "on" }));
        assert!(both.contains("recurring"));
    }

    #[test]
    fn test_platform_tag_added_for_known_platform() {
        let tags = tags_for(json!({
            "processingChannels": ["external-ecommerce"],
            "ecommercePlatform": "shopify",
        }));
        assert!(tags.contains("shopify"));

        let other = tags_for(json!({
            "processingChannels": ["external-ecommerce"],
            "ecommercePlatform": "other",
        }));
        assert!(!other.contains("other"));
    }

    #[test]
    fn test_advanced_fraud_swaps_avs_cvv() {
        let advanced = tags_for(json!({ "fraudProtectionAdvanced": "yes" }));
        assert!(advanced.contains("fraud"));
        assert!(advanced.contains("advanced"));
        assert!(!advanced.contains("avs"));

        let basic = tags_for(json!({}));
        assert!(basic.contains("avs"));
        assert!(basic.contains("cvv"));
    }

    #[test]
    fn test_reauthorization_requires_multi_day() {
        let same_day = tags_for(json!({
            "processingTimeline": "same-day",
            "needsReauth": "yes",
        }));
        assert!(!same_day.contains("reauthorization"));

        let multi_day = tags_for(json!({
            "processingTimeline": "multi-day",
            "needsReauth": "yes",
        }));
        assert!(multi_day.contains("reauthorization"));
        assert!(multi_day.contains("authorization"));
    }

    #[test]
    fn test_deterministic() {
        let raw = json!({
            "acceptACH": "yes",
            "needs3ds": "yes",
            "paymentMethods": ["paypal", "venmo"],
            "processingChannels": ["storefront", "moto"],
        });
        let a = tags_for(raw.clone());
        let b = tags_for(raw);
        assert_eq!(a, b);
    }
}
