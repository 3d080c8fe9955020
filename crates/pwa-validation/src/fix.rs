//! # Quick Fixes
//!
//! Turns failed results into concrete edits. A result carrying a
//! `suggested_fix` becomes a [`FixKind::Replace`] of the member's value; a
//! result that failed because the member is missing becomes a
//! [`FixKind::Insert`] of the catalog default, when one exists.
//!
//! Fixes are applied to a copy of the document. Writing the result back
//! is the caller's business.

use std::collections::HashSet;

use pwa_core::{Category, ManifestDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::RuleCatalog;
use crate::engine::ValidationResult;

/// How a fix changes the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    /// Replace the value of a present member.
    Replace,
    /// Add an absent member.
    Insert,
}

/// One member edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickFix {
    pub member: String,
    pub value: Value,
    pub kind: FixKind,
}

/// The fix a single result offers, if any.
pub fn quick_fix_for(result: &ValidationResult, catalog: &RuleCatalog) -> Option<QuickFix> {
    if result.valid {
        return None;
    }
    let member = result.member.as_deref()?;
    if let Some(value) = &result.suggested_fix {
        return Some(QuickFix {
            member: member.to_string(),
            value: value.clone(),
            kind: FixKind::Replace,
        });
    }
    if result.missing {
        return catalog.default_for(member).map(|value| QuickFix {
            member: member.to_string(),
            value,
            kind: FixKind::Insert,
        });
    }
    None
}

/// Collect the fixes for a set of results, at most one per member.
///
/// Replacements are always planned. Inserts are planned only for members
/// whose result category is listed in `insert_for`, so a caller can fill
/// in required members without also adding every optional placeholder.
pub fn plan_fixes(
    results: &[ValidationResult],
    catalog: &RuleCatalog,
    insert_for: &[Category],
) -> Vec<QuickFix> {
    let mut planned = HashSet::new();
    let mut fixes = Vec::new();
    for result in results {
        let Some(fix) = quick_fix_for(result, catalog) else {
            continue;
        };
        if fix.kind == FixKind::Insert && !insert_for.contains(&result.category) {
            continue;
        }
        if planned.insert(fix.member.clone()) {
            fixes.push(fix);
        }
    }
    tracing::debug!(fixes = fixes.len(), "quick fixes planned");
    fixes
}

/// Apply fixes to a copy of `document`. Later fixes to the same member
/// overwrite earlier ones.
pub fn apply_fixes(document: &ManifestDocument, fixes: &[QuickFix]) -> ManifestDocument {
    let mut members = document.as_map().clone();
    for fix in fixes {
        members.insert(fix.member.clone(), fix.value.clone());
    }
    ManifestDocument::from_map(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::standard_catalog;
    use crate::engine::{is_install_ready, validate_manifest};
    use serde_json::json;

    fn padded_manifest() -> ManifestDocument {
        ManifestDocument::from_value(json!({
            "name": " Foo ",
            "short_name": "Foo ",
            "start_url": "/",
            "display": "standalone",
            "background_color": "#fff",
            "theme_color": "#fff",
            "icons": [{ "src": "a.png", "sizes": "512x512", "type": "image/png" }]
        }))
        .unwrap()
    }

    #[test]
    fn suggested_fix_becomes_replace() {
        let results = validate_manifest(&padded_manifest());
        let fixes = plan_fixes(&results, standard_catalog(), &[]);
        assert_eq!(
            fixes,
            vec![
                QuickFix {
                    member: "name".to_string(),
                    value: json!("Foo"),
                    kind: FixKind::Replace
                },
                QuickFix {
                    member: "short_name".to_string(),
                    value: json!("Foo"),
                    kind: FixKind::Replace
                },
            ]
        );
    }

    #[test]
    fn missing_member_becomes_insert_of_default() {
        let results = validate_manifest(&ManifestDocument::empty());
        let start_url = results
            .iter()
            .find(|r| r.member.as_deref() == Some("start_url"))
            .unwrap();
        assert_eq!(
            quick_fix_for(start_url, standard_catalog()),
            Some(QuickFix {
                member: "start_url".to_string(),
                value: json!("/"),
                kind: FixKind::Insert
            })
        );

        let shortcuts = results
            .iter()
            .find(|r| r.member.as_deref() == Some("shortcuts"))
            .unwrap();
        assert_eq!(quick_fix_for(shortcuts, standard_catalog()), None);
    }

    #[test]
    fn invalid_present_value_has_no_fix() {
        let document = padded_manifest().with_member("theme_color", json!("blue"));
        let results = validate_manifest(&document);
        let theme = results
            .iter()
            .find(|r| r.member.as_deref() == Some("theme_color"))
            .unwrap();
        assert!(!theme.valid);
        assert_eq!(quick_fix_for(theme, standard_catalog()), None);
    }

    #[test]
    fn inserts_respect_category_filter() {
        let results = validate_manifest(&ManifestDocument::empty());
        let required = plan_fixes(&results, standard_catalog(), &[Category::Required]);
        let members: Vec<&str> = required.iter().map(|f| f.member.as_str()).collect();
        assert_eq!(
            members,
            vec!["icons", "name", "short_name", "start_url", "display", "background_color", "theme_color"]
        );
        assert!(required.iter().all(|f| f.kind == FixKind::Insert));

        let everything = plan_fixes(&results, standard_catalog(), Category::all());
        // shortcuts has no default
        assert_eq!(everything.len(), 16);
    }

    #[test]
    fn applying_required_inserts_makes_empty_manifest_installable() {
        let empty = ManifestDocument::empty();
        let fixes = plan_fixes(&validate_manifest(&empty), standard_catalog(), &[Category::Required]);
        let fixed = apply_fixes(&empty, &fixes);

        assert!(empty.is_empty());
        assert!(is_install_ready(&fixed, standard_catalog()));
    }

    #[test]
    fn applying_replacements_clears_whitespace_failures() {
        let document = padded_manifest();
        let fixes = plan_fixes(&validate_manifest(&document), standard_catalog(), &[]);
        let fixed = apply_fixes(&document, &fixes);

        assert_eq!(document.get("name"), Some(&json!(" Foo ")));
        assert_eq!(fixed.get("name"), Some(&json!("Foo")));
        assert!(is_install_ready(&fixed, standard_catalog()));
    }
}
