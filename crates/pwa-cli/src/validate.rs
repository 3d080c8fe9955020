//! # Validate Subcommand
//!
//! Evaluates a manifest file against the standard catalog and prints the
//! report, failures first.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pwa_core::Category;
use pwa_validation::{standard_catalog, ManifestReport};

use crate::config::{OutputFormat, StudioConfig};
use crate::{gate_code, load_manifest};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the manifest file.
    pub manifest: PathBuf,

    /// Output format. Overrides the configuration file.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Fail when a rule of this category (or a stricter one) fails.
    #[arg(long)]
    pub gate: Option<Category>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &StudioConfig) -> Result<u8> {
    let document = match load_manifest(&args.manifest) {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };
    let report = ManifestReport::build(&document, standard_catalog())?;
    let gate = args.gate.unwrap_or(config.gate);

    match args.format.unwrap_or(config.format) {
        OutputFormat::Text => print!("{}", render_text(&report, gate)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(gate_code(report.fails_gate(gate)))
}

/// Human-readable report.
pub fn render_text(report: &ManifestReport, gate: Category) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "manifest {}", report.digest);
    for result in report.sorted_results() {
        let status = if result.valid { "PASS" } else { "FAIL" };
        let label = match &result.test_name {
            Some(test) if result.member.is_some() => format!("{}/{test}", result.label()),
            _ => result.label().to_string(),
        };
        let _ = write!(out, "  {status} [{:<11}] {label}: ", result.category.as_str());
        match &result.error_string {
            Some(error) => {
                let _ = write!(out, "{error}");
            }
            None => {
                let _ = write!(out, "{}", result.display_string);
            }
        }
        if let Some(fix) = &result.suggested_fix {
            let _ = write!(out, " (fix: {fix})");
        }
        out.push('\n');
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.score);
    let verdict = if report.fails_gate(gate) { "FAILED" } else { "OK" };
    let _ = writeln!(out, "gate ({gate}): {verdict}");
    let _ = writeln!(
        out,
        "packageable: {}",
        if report.is_packageable() { "yes" } else { "no" }
    );
    out
}
