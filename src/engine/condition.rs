//! Visibility condition expressions.
//!
//! Sections and checklist items carry optional declarative predicates over
//! the [`Configuration`] field set, e.g.:
//!
//! - `processing_timeline == multi-day && needs_reauth == true`
//! - `payment_methods contains paypal`
//! - `processing_channels.count > 1 || accept_ach == true`
//!
//! The grammar is an OR-list of AND-lists of simple comparisons, no
//! parentheses. Evaluation is pure: the same Configuration always yields the
//! same answer.

use anyhow::{anyhow, Result};

use crate::form::Configuration;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Operator {
    Eq,
    Ne,
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug)]
struct Comparison {
    path: String,
    operator: Operator,
    value: String,
}

/// A field value resolved from Configuration.
enum Field<'a> {
    Flag(bool),
    Text(String),
    List(&'a [String]),
    Count(usize),
}

/// Evaluate a condition expression against a configuration.
///
/// Errors on unknown paths or malformed syntax; callers that must stay total
/// (the section filter) treat an error as "not visible" and log it.
pub fn evaluate(expr: &str, config: &Configuration) -> Result<bool> {
    for group in expr.split("||") {
        if evaluate_group(group, config)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Validate an expression without caring about its truth value. Used at
/// content load so a shipped expression can never error at request time.
pub fn check(expr: &str) -> Result<()> {
    // Evaluating every clause against a default configuration catches
    // unknown fields and operator/field type mismatches, not just syntax.
    let defaults = Configuration::default();
    for group in expr.split("||") {
        for clause in group.split("&&") {
            evaluate_comparison(clause, &defaults)?;
        }
    }
    Ok(())
}

fn evaluate_group(group: &str, config: &Configuration) -> Result<bool> {
    for clause in group.split("&&") {
        if !evaluate_comparison(clause, config)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn evaluate_comparison(clause: &str, config: &Configuration) -> Result<bool> {
    let comparison = parse_comparison(clause)?;
    let field = resolve_path(&comparison.path, config)
        .ok_or_else(|| anyhow!("unknown field '{}'", comparison.path))?;

    match (comparison.operator, field) {
        (Operator::Eq, field) => Ok(scalar(&field)? == comparison.value),
        (Operator::Ne, field) => Ok(scalar(&field)? != comparison.value),
        (Operator::Contains, Field::List(items)) => {
            Ok(items.iter().any(|item| *item == comparison.value))
        }
        (Operator::Contains, _) => Err(anyhow!(
            "'contains' requires a multi-select field, got '{}'",
            comparison.path
        )),
        (op, Field::Count(n)) => {
            let rhs: i64 = comparison
                .value
                .parse()
                .map_err(|_| anyhow!("'{}' is not a number", comparison.value))?;
            let n = n as i64;
            Ok(match op {
                Operator::Gt => n > rhs,
                Operator::Gte => n >= rhs,
                Operator::Lt => n < rhs,
                Operator::Lte => n <= rhs,
                _ => unreachable!(),
            })
        }
        (op, _) => Err(anyhow!(
            "operator {op:?} requires a '.count' path, got '{}'",
            comparison.path
        )),
    }
}

fn scalar(field: &Field<'_>) -> Result<String> {
    match field {
        Field::Flag(b) => Ok(b.to_string()),
        Field::Text(s) => Ok(s.clone()),
        Field::Count(n) => Ok(n.to_string()),
        Field::List(_) => Err(anyhow!("cannot compare a multi-select with ==/!=")),
    }
}

fn parse_comparison(clause: &str) -> Result<Comparison> {
    let parts: Vec<&str> = clause.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(anyhow!(
            "invalid condition '{}': expected 'field operator value'",
            clause.trim()
        ));
    }

    let operator = match parts[1] {
        "==" => Operator::Eq,
        "!=" => Operator::Ne,
        "contains" => Operator::Contains,
        ">" => Operator::Gt,
        ">=" => Operator::Gte,
        "<" => Operator::Lt,
        "<=" => Operator::Lte,
        op => return Err(anyhow!("unknown operator '{op}'")),
    };

    Ok(Comparison {
        path: parts[0].to_string(),
        operator,
        value: parts[2].to_lowercase(),
    })
}

fn resolve_path<'a>(path: &str, config: &'a Configuration) -> Option<Field<'a>> {
    if let Some(base) = path.strip_suffix(".count") {
        return match base {
            "payment_methods" => Some(Field::Count(config.payment_methods.len())),
            "processing_channels" => Some(Field::Count(config.processing_channels.len())),
            "migrate_data" => Some(Field::Count(config.migrate_data.len())),
            _ => None,
        };
    }

    Some(match path {
        "business_model" => Field::Text(config.business_model.as_str().to_string()),
        "processing_timeline" => Field::Text(config.processing_timeline.as_str().to_string()),
        "fraud_tier" => Field::Text(config.fraud_tier.as_str().to_string()),
        "ecommerce_platform" => {
            Field::Text(config.ecommerce_platform.clone().unwrap_or_default())
        }
        "subscription_based" => Field::Flag(config.subscription_based),
        "needs_reauth" => Field::Flag(config.needs_reauth),
        "partial_capture" => Field::Flag(config.partial_capture),
        "over_capture" => Field::Flag(config.over_capture),
        "l2l3_processing" => Field::Flag(config.l2l3_processing),
        "accept_ach" => Field::Flag(config.accept_ach),
        "ach_network_check" => Field::Flag(config.ach_network_check),
        "ach_recurring" => Field::Flag(config.ach_recurring),
        "ach_realtime_status" => Field::Flag(config.ach_realtime_status),
        "needs_3ds" => Field::Flag(config.needs_3ds),
        "needs_order_sync" => Field::Flag(config.needs_order_sync),
        "realtime_updates" => Field::Flag(config.realtime_updates),
        "custom_descriptors" => Field::Flag(config.custom_descriptors),
        "has_existing_vault" => Field::Flag(config.has_existing_vault),
        "wants_migration" => Field::Flag(config.wants_migration),
        "payment_methods" => Field::List(&config.payment_methods),
        "processing_channels" => Field::List(&config.processing_channels),
        "migrate_data" => Field::List(&config.migrate_data),
        _ => return None,
    })
}
