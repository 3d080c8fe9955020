//! # Fix Subcommand
//!
//! Applies quick fixes to a manifest and writes it back as pretty JSON.
//! Replacements (trimmed strings) are always applied; missing members are
//! inserted for the categories listed in `fix_missing`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pwa_validation::{apply_fixes, evaluate, plan_fixes, standard_catalog, AggregateScore, FixKind};

use crate::config::StudioConfig;
use crate::{gate_code, load_manifest};

/// Arguments for the fix subcommand.
#[derive(Args, Debug)]
pub struct FixArgs {
    /// Path to the manifest file.
    pub manifest: PathBuf,

    /// Write the fixed manifest here instead of overwriting the input.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the planned fixes without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the fix subcommand.
pub fn run_fix(args: &FixArgs, config: &StudioConfig) -> Result<u8> {
    let document = match load_manifest(&args.manifest) {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };
    let catalog = standard_catalog();
    let results = evaluate(&document, catalog);
    let fixes = plan_fixes(&results, catalog, &config.fix_missing);

    if fixes.is_empty() {
        println!("no fixes available");
        return Ok(gate_code(AggregateScore::aggregate(&results).fails_gate(config.gate)));
    }
    for fix in &fixes {
        let verb = match fix.kind {
            FixKind::Replace => "replace",
            FixKind::Insert => "insert ",
        };
        println!("  {verb} {} = {}", fix.member, fix.value);
    }
    if args.dry_run {
        return Ok(gate_code(AggregateScore::aggregate(&results).fails_gate(config.gate)));
    }

    let fixed = apply_fixes(&document, &fixes);
    let target = args.out.as_ref().unwrap_or(&args.manifest);
    let mut text = fixed.to_pretty_json()?;
    text.push('\n');
    std::fs::write(target, text)
        .with_context(|| format!("failed to write manifest: {}", target.display()))?;
    println!("wrote {} fix(es) to {}", fixes.len(), target.display());

    let score = AggregateScore::aggregate(&evaluate(&fixed, catalog));
    tracing::info!(%score, "fixed manifest re-evaluated");
    Ok(gate_code(score.fails_gate(config.gate)))
}
