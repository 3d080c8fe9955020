//! # Field Subcommand
//!
//! Checks one member value without a manifest file, the way an editor
//! validates a field while it is being typed.

use anyhow::Result;
use clap::Args;
use pwa_validation::{standard_catalog, validate_single_field, FieldVerdict};
use serde_json::Value;

use crate::config::{OutputFormat, StudioConfig};
use crate::gate_code;

/// Arguments for the field subcommand.
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Manifest member name, e.g. `theme_color`.
    pub member: String,

    /// Member value. Text starting with `[`, `{` or `"` is read as JSON;
    /// anything else is taken as a string, so `pwa-studio field name "My App"`
    /// and `pwa-studio field short_name 2048` both check a string.
    pub value: String,
}

/// Parse the value argument.
///
/// Only arrays, objects and quoted strings are parsed; bare numbers and
/// keywords stay strings. Malformed JSON also falls back to a string.
pub fn parse_value(raw: &str) -> Value {
    let as_string = || Value::String(raw.to_string());
    match raw.trim_start().chars().next() {
        Some('[' | '{' | '"') => serde_json::from_str(raw).unwrap_or_else(|_| as_string()),
        _ => as_string(),
    }
}

/// Execute the field subcommand.
pub fn run_field(args: &FieldArgs, config: &StudioConfig) -> Result<u8> {
    let catalog = standard_catalog();
    if catalog.rules_for(&args.member).next().is_none() {
        tracing::info!(member = %args.member, "member is not in the catalog");
    }
    let verdict = validate_single_field(&args.member, &parse_value(&args.value), catalog);

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&args.member, &verdict)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verdict)?),
    }
    Ok(gate_code(!verdict.valid))
}

fn render_text(member: &str, verdict: &FieldVerdict) -> String {
    if verdict.valid {
        return format!("{member}: valid\n");
    }
    let mut out = format!("{member}: invalid\n");
    for error in &verdict.errors {
        out.push_str("  - ");
        out.push_str(error);
        out.push('\n');
    }
    out
}
