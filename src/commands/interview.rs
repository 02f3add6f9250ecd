//! Interactive discovery interview: walk the questionnaire in the terminal
//! and generate the guide from the collected answers.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::config::Config;
use crate::form::{BusinessModel, Configuration, FraudTier, Timeline};
use crate::render::{self, OutputFormat};

/// Options for the interview command
#[derive(Debug, Clone)]
pub struct InterviewOptions {
    /// Output file; stdout when omitted
    pub output: Option<PathBuf>,
    /// Output format override
    pub format: Option<OutputFormat>,
    /// Also save the raw answers to this path
    pub save_answers: Option<PathBuf>,
}

/// Execute the interview command
pub fn execute_interview(options: InterviewOptions, config: &Config) -> Result<()> {
    let library = super::load_library(config)?;
    let answers = run_interview()?;

    if let Some(path) = &options.save_answers {
        let raw = serde_json::to_string_pretty(&answers)?;
        std::fs::write(path, raw)?;
        println!("{} Saved answers to {}", style("✓").green(), path.display());
    }

    let guide = render::build_guide(&library, &answers);
    println!();
    let format = super::resolve_format(options.format, config)?;
    super::emit_guide(&guide, format, options.output.as_deref())
}

fn run_interview() -> Result<Configuration> {
    let theme = ColorfulTheme::default();
    let mut answers = Configuration::default();

    println!("{}", style("Payment Gateway Discovery Interview").bold());
    println!();

    answers.merchant_name = Input::with_theme(&theme)
        .with_prompt("Merchant / company name")
        .interact_text()?;

    answers.merchant_email = Input::with_theme(&theme)
        .with_prompt("Contact email")
        .allow_empty(true)
        .interact_text()?;

    let models = [
        BusinessModel::B2c,
        BusinessModel::B2b,
        BusinessModel::Saas,
        BusinessModel::Hybrid,
    ];
    let model = Select::with_theme(&theme)
        .with_prompt("Business model")
        .items(&models.iter().map(|m| m.label()).collect::<Vec<_>>())
        .default(0)
        .interact()?;
    answers.business_model = models[model];

    let timelines = [Timeline::SameDay, Timeline::MultiDay];
    let timeline = Select::with_theme(&theme)
        .with_prompt("When are transactions captured relative to authorization?")
        .items(&["Same day", "One or more days later"])
        .default(0)
        .interact()?;
    answers.processing_timeline = timelines[timeline];

    if answers.processing_timeline == Timeline::MultiDay {
        answers.needs_reauth = Confirm::with_theme(&theme)
            .with_prompt("Will you need to reauthorize expired authorizations?")
            .default(false)
            .interact()?;
    }

    answers.partial_capture = Confirm::with_theme(&theme)
        .with_prompt("Capture less than the authorized amount (partial capture)?")
        .default(false)
        .interact()?;
    answers.over_capture = Confirm::with_theme(&theme)
        .with_prompt("Capture more than the authorized amount (over-capture)?")
        .default(false)
        .interact()?;
    answers.l2l3_processing = Confirm::with_theme(&theme)
        .with_prompt("Send Level 2/3 card data for B2B interchange rates?")
        .default(false)
        .interact()?;

    let method_choices = [
        ("paypal", "PayPal"),
        ("apple-pay", "Apple Pay"),
        ("google-pay", "Google Pay"),
        ("venmo", "Venmo"),
        ("bnpl", "Buy Now Pay Later"),
    ];
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Additional payment methods (cards are always included)")
        .items(&method_choices.iter().map(|(_, l)| *l).collect::<Vec<_>>())
        .interact()?;
    answers.payment_methods = picked
        .into_iter()
        .map(|i| method_choices[i].0.to_string())
        .collect();

    answers.accept_ach = Confirm::with_theme(&theme)
        .with_prompt("Accept ACH / bank transfer payments?")
        .default(false)
        .interact()?;
    if answers.accept_ach {
        answers.ach_network_check = Confirm::with_theme(&theme)
            .with_prompt("Validate bank accounts with Network Check?")
            .default(false)
            .interact()?;
        answers.ach_recurring = Confirm::with_theme(&theme)
            .with_prompt("Use ACH for recurring payments?")
            .default(false)
            .interact()?;
        answers.ach_realtime_status = Confirm::with_theme(&theme)
            .with_prompt("Need real-time ACH status updates?")
            .default(false)
            .interact()?;
    }

    let channel_choices = [
        ("storefront", "Commerce platform storefront"),
        ("external-ecommerce", "External e-commerce platform"),
        ("moto", "Mail order / telephone order"),
        ("payment-link", "Pay-by-link"),
    ];
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Processing channels")
        .items(&channel_choices.iter().map(|(_, l)| *l).collect::<Vec<_>>())
        .interact()?;
    answers.processing_channels = picked
        .into_iter()
        .map(|i| channel_choices[i].0.to_string())
        .collect();

    if answers.has_channel("external-ecommerce") {
        let platforms = ["shopify", "magento", "bigcommerce", "woocommerce", "other"];
        let platform = Select::with_theme(&theme)
            .with_prompt("Which e-commerce platform?")
            .items(&["Shopify", "Magento", "BigCommerce", "WooCommerce", "Other"])
            .default(0)
            .interact()?;
        answers.ecommerce_platform = Some(platforms[platform].to_string());
        answers.needs_order_sync = Confirm::with_theme(&theme)
            .with_prompt("Sync external orders back into the ERP?")
            .default(false)
            .interact()?;
    }

    answers.subscription_based = Confirm::with_theme(&theme)
        .with_prompt("Do you sell subscriptions or other recurring billing?")
        .default(false)
        .interact()?;

    answers.needs_3ds = Confirm::with_theme(&theme)
        .with_prompt("Enable 3D Secure 2 (required for EU/UK SCA)?")
        .default(false)
        .interact()?;

    let tiers = [FraudTier::Basic, FraudTier::Premium, FraudTier::Advanced];
    let tier = Select::with_theme(&theme)
        .with_prompt("Fraud protection tier")
        .items(&[
            "Basic (AVS/CVV rules)",
            "Premium",
            "Advanced (AI risk scoring)",
        ])
        .default(0)
        .interact()?;
    answers.fraud_tier = tiers[tier];

    answers.realtime_updates = Confirm::with_theme(&theme)
        .with_prompt("Receive real-time transaction updates via webhooks?")
        .default(false)
        .interact()?;
    answers.custom_descriptors = Confirm::with_theme(&theme)
        .with_prompt("Use custom statement descriptors?")
        .default(false)
        .interact()?;

    answers.has_existing_vault = Confirm::with_theme(&theme)
        .with_prompt("Do you have payment data vaulted with an existing processor?")
        .default(false)
        .interact()?;
    if answers.has_existing_vault {
        answers.wants_migration = Confirm::with_theme(&theme)
            .with_prompt("Migrate that data to the gateway vault?")
            .default(false)
            .interact()?;
        if answers.wants_migration {
            let data_choices = [
                ("cards", "Card tokens"),
                ("bank-accounts", "Bank accounts"),
                ("customers", "Customer profiles"),
            ];
            let picked = MultiSelect::with_theme(&theme)
                .with_prompt("What should be migrated?")
                .items(&data_choices.iter().map(|(_, l)| *l).collect::<Vec<_>>())
                .interact()?;
            answers.migrate_data = picked
                .into_iter()
                .map(|i| data_choices[i].0.to_string())
                .collect();
        }
    }

    Ok(answers)
}
