//! # Missing Subcommand
//!
//! Lists the catalog members a manifest does not declare, grouped by
//! category, each with the default `fix` would insert.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pwa_core::Category;
use pwa_validation::{standard_catalog, MissingFields, RuleCatalog};

use crate::config::{OutputFormat, StudioConfig};
use crate::{gate_code, load_manifest};

/// Arguments for the missing subcommand.
#[derive(Args, Debug)]
pub struct MissingArgs {
    /// Path to the manifest file.
    pub manifest: PathBuf,
}

/// Execute the missing subcommand. Fails the gate when a member of the
/// gate category (or a stricter one) is absent.
pub fn run_missing(args: &MissingArgs, config: &StudioConfig) -> Result<u8> {
    let document = match load_manifest(&args.manifest) {
        Ok(document) => document,
        Err(code) => return Ok(code),
    };
    let catalog = standard_catalog();
    let missing = MissingFields::collect(&document, catalog);

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&missing, catalog)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&missing)?),
    }

    let failed = Category::all()
        .iter()
        .filter(|c| c.rank() <= config.gate.rank())
        .any(|c| !missing.of(*c).is_empty());
    Ok(gate_code(failed))
}

fn render_text(missing: &MissingFields, catalog: &RuleCatalog) -> String {
    if missing.is_empty() {
        return "no missing members\n".to_string();
    }
    let mut out = String::new();
    for category in Category::all() {
        let members = missing.of(*category);
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{category}:");
        for member in members {
            match catalog.default_for(member) {
                Some(default) => {
                    let _ = writeln!(out, "  {member} (default: {default})");
                }
                None => {
                    let _ = writeln!(out, "  {member}");
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EXIT_GATE_FAILED, EXIT_OK, EXIT_UNREADABLE};
    use pwa_core::ManifestDocument;

    #[test]
    fn empty_manifest_misses_required_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "{}").unwrap();

        let code = run_missing(&MissingArgs { manifest: path }, &StudioConfig::default()).unwrap();
        assert_eq!(code, EXIT_GATE_FAILED);
    }

    #[test]
    fn optional_gaps_pass_required_gate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(
            &path,
            r##"{"icons": [], "name": "", "short_name": "", "start_url": "", "display": "", "background_color": "", "theme_color": ""}"##,
        )
        .unwrap();

        let code = run_missing(&MissingArgs { manifest: path }, &StudioConfig::default()).unwrap();
        assert_eq!(code, EXIT_OK);
    }

    #[test]
    fn unreadable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_missing(
            &MissingArgs {
                manifest: dir.path().join("absent.json"),
            },
            &StudioConfig::default(),
        )
        .unwrap();
        assert_eq!(code, EXIT_UNREADABLE);
    }

    #[test]
    fn text_groups_by_category_with_defaults() {
        let document = ManifestDocument::parse(r#"{"name": "App"}"#).unwrap();
        let missing = MissingFields::collect(&document, standard_catalog());
        let text = render_text(&missing, standard_catalog());

        assert!(text.starts_with("required:\n  icons (default: "));
        assert!(text.contains("  start_url (default: \"/\")\n"));
        assert!(text.contains("recommended:\n"));
        assert!(text.contains("  shortcuts\n"));
        assert!(!text.contains("  name "));
    }
}
