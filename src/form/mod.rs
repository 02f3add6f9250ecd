//! Discovery form data model and normalization.
//!
//! Raw submissions arrive as loosely-typed JSON: checkbox fields may be
//! booleans, the literal string "on", or "yes"/"no"; multi-selects may be an
//! array or a single repeated value. [`Configuration::from_raw`] turns any
//! such payload into a strictly-typed, immutable [`Configuration`]. It is
//! total: missing or malformed fields default to false/empty and never fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Merchant business model selected on the discovery form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessModel {
    B2c,
    B2b,
    Saas,
    Hybrid,
    #[default]
    Unspecified,
}

impl BusinessModel {
    fn parse(s: &str) -> Self {
        match s {
            "b2c" => Self::B2c,
            "b2b" => Self::B2b,
            "saas" => Self::Saas,
            "hybrid" => Self::Hybrid,
            _ => Self::Unspecified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::B2c => "Business to Consumer (B2C)",
            Self::B2b => "Business to Business (B2B)",
            Self::Saas => "SaaS / Subscription",
            Self::Hybrid => "Hybrid (B2B + B2C)",
            Self::Unspecified => "Unspecified",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::B2c => "b2c",
            Self::B2b => "b2b",
            Self::Saas => "saas",
            Self::Hybrid => "hybrid",
            Self::Unspecified => "",
        }
    }
}

/// Gap between authorization and capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeline {
    SameDay,
    MultiDay,
    #[default]
    Unspecified,
}

impl Timeline {
    fn parse(s: &str) -> Self {
        match s {
            "same-day" => Self::SameDay,
            "multi-day" => Self::MultiDay,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SameDay => "same-day",
            Self::MultiDay => "multi-day",
            Self::Unspecified => "",
        }
    }
}

/// Fraud protection tier. Basic AVS/CVV rules are always available; the
/// advanced tier adds AI risk scoring and transaction review holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FraudTier {
    #[default]
    Basic,
    Premium,
    Advanced,
}

impl FraudTier {
    fn parse(s: &str) -> Self {
        // The form encodes the tier in a single "fraudProtectionAdvanced"
        // field: "yes" means the advanced product, "premium" the mid tier.
        match s {
            "yes" | "advanced" => Self::Advanced,
            "premium" => Self::Premium,
            _ => Self::Basic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Advanced => "advanced",
        }
    }
}

/// Normalized representation of one merchant's discovery-form answers.
///
/// Created once per request and immutable afterwards. Every downstream
/// component (tag mapper, scorer, filter, assembler) is a pure function of
/// this struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    // Identity
    pub merchant_name: String,
    pub merchant_email: String,

    // Enumerated choices
    pub business_model: BusinessModel,
    pub processing_timeline: Timeline,
    // The form's wire name for the tier field.
    #[serde(rename = "fraudProtectionAdvanced")]
    pub fraud_tier: FraudTier,

    // Feature flags
    pub subscription_based: bool,
    pub needs_reauth: bool,
    pub partial_capture: bool,
    pub over_capture: bool,
    pub l2l3_processing: bool,
    #[serde(rename = "acceptACH")]
    pub accept_ach: bool,
    pub ach_network_check: bool,
    pub ach_recurring: bool,
    pub ach_realtime_status: bool,
    pub needs_3ds: bool,
    pub needs_order_sync: bool,
    pub realtime_updates: bool,
    pub custom_descriptors: bool,
    pub has_existing_vault: bool,
    pub wants_migration: bool,

    // Multi-selects (deduplicated, insertion order preserved)
    pub payment_methods: Vec<String>,
    pub processing_channels: Vec<String>,
    pub migrate_data: Vec<String>,

    pub ecommerce_platform: Option<String>,
}

impl Configuration {
    /// Normalize a raw form submission. Never fails; anything unrecognized
    /// contributes nothing.
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            merchant_name: text(raw, "merchantName"),
            merchant_email: text(raw, "merchantEmail"),
            business_model: BusinessModel::parse(&text(raw, "businessModel")),
            processing_timeline: Timeline::parse(&text(raw, "processingTimeline")),
            fraud_tier: FraudTier::parse(&text(raw, "fraudProtectionAdvanced")),
            subscription_based: flag(raw, "subscriptionBased"),
            needs_reauth: flag(raw, "needsReauth"),
            partial_capture: flag(raw, "partialCapture"),
            over_capture: flag(raw, "overCapture"),
            l2l3_processing: flag(raw, "l2l3Processing"),
            accept_ach: flag(raw, "acceptACH"),
            ach_network_check: flag(raw, "achNetworkCheck"),
            ach_recurring: flag(raw, "achRecurring"),
            ach_realtime_status: flag(raw, "achRealtimeStatus"),
            needs_3ds: flag(raw, "needs3ds"),
            needs_order_sync: flag(raw, "needsOrderSync"),
            realtime_updates: flag(raw, "realtimeUpdates"),
            custom_descriptors: flag(raw, "customDescriptors"),
            has_existing_vault: flag(raw, "hasExistingVault"),
            wants_migration: flag(raw, "wantsMigration"),
            payment_methods: multi(raw, "paymentMethods"),
            processing_channels: multi(raw, "processingChannels"),
            migrate_data: multi(raw, "migrateData"),
            ecommerce_platform: choice(raw, "ecommercePlatform"),
        }
    }

    /// True when the given channel was selected.
    pub fn has_channel(&self, channel: &str) -> bool {
        self.processing_channels.iter().any(|c| c == channel)
    }

    /// True when the given payment method was selected.
    pub fn has_payment_method(&self, method: &str) -> bool {
        self.payment_methods.iter().any(|m| m == method)
    }
}

/// Read a checkbox-style field as a strict boolean.
fn flag(raw: &Value, key: &str) -> bool {
    match raw.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            matches!(s.trim().to_lowercase().as_str(), "on" | "yes" | "true" | "1")
        }
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(other) => {
            tracing::warn!(key, value = %other, "unrecognized flag value, treating as false");
            false
        }
        None => false,
    }
}

/// Read a free-text field, trimmed; missing keys yield the empty string.
fn text(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Read an optional single-choice field; empty selections collapse to None.
fn choice(raw: &Value, key: &str) -> Option<String> {
    let value = text(raw, key);
    if value.is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}

/// Read a multi-select field: an array of strings, or a single string for a
/// lone selection. Duplicates are dropped, first occurrence wins.
fn multi(raw: &Value, key: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |s: &str| {
        let s = s.trim().to_lowercase();
        if !s.is_empty() && !out.iter().any(|existing| *existing == s) {
            out.push(s);
        }
    };

    match raw.get(key) {
        Some(Value::Array(values)) => {
            for v in values {
                if let Some(s) = v.as_str() {
                    push(s);
                }
            }
        }
        Some(Value::String(s)) => push(s),
        _ => {}
    }

    out
}
