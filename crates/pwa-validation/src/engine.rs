//! # Evaluation Engine
//!
//! Runs a [`RuleCatalog`] over a [`ManifestDocument`] and produces one
//! [`ValidationResult`] per rule, in catalog order.
//!
//! ## Evaluation
//!
//! 1. A rule whose member is absent fails on the "missing field" path,
//!    whatever its category. The predicate is not called.
//! 2. A present member is handed to the predicate. `Pass` is valid,
//!    `Fail` is invalid with the rule's (or the predicate's) message, and
//!    `FailWithFix` is invalid with the corrected value attached.
//! 3. A predicate that panics is contained to its own rule: the result is
//!    a regular failure reading "could not evaluate rule for ...", and the
//!    remaining rules still run.
//!
//! Unknown members in the document are ignored. The engine never mutates
//! the document and never returns an error for a parsed document.

use std::panic::{self, AssertUnwindSafe};

use pwa_core::{Category, ManifestDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{standard_catalog, RuleCatalog};
use crate::rule::{Check, Outcome, Rule};

/// Result of evaluating one rule against one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Member the rule inspected; `None` for whole-document rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    /// Sub-check name, e.g. `"whitespace"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_name: Option<String>,
    /// Category of the rule.
    pub category: Category,
    /// Whether the check passed.
    pub valid: bool,
    /// Failure explanation. Only set when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_string: Option<String>,
    /// Corrected member value offered by the rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<Value>,
    /// Scorecard label.
    pub display_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_link: Option<String>,
    /// True when the failure is because the member is absent.
    #[serde(default)]
    pub missing: bool,
}

impl ValidationResult {
    fn base(rule: &Rule) -> Self {
        Self {
            member: rule.member.map(str::to_string),
            test_name: rule.test_name.map(str::to_string),
            category: rule.category,
            valid: false,
            error_string: None,
            suggested_fix: None,
            display_string: rule.display_string.to_string(),
            info_string: rule.info_string.map(str::to_string),
            docs_link: rule.docs_link.map(str::to_string),
            missing: false,
        }
    }

    fn from_outcome(rule: &Rule, outcome: Outcome) -> Self {
        let base = Self::base(rule);
        match outcome {
            Outcome::Pass => Self { valid: true, ..base },
            Outcome::Fail(reason) => Self {
                error_string: Some(reason.unwrap_or_else(|| rule.error_string.to_string())),
                ..base
            },
            Outcome::FailWithFix(fix) => Self {
                error_string: Some(rule.error_string.to_string()),
                suggested_fix: Some(fix),
                ..base
            },
        }
    }

    fn missing(rule: &Rule, member: &str) -> Self {
        Self {
            error_string: Some(format!(
                "manifest is missing {} field `{member}`",
                rule.category
            )),
            missing: true,
            ..Self::base(rule)
        }
    }

    fn unevaluated(rule: &Rule) -> Self {
        Self {
            error_string: Some(format!("could not evaluate rule for `{}`", rule.label())),
            ..Self::base(rule)
        }
    }

    /// Member name, or `"(document)"` for whole-document rules.
    pub fn label(&self) -> &str {
        self.member
            .as_deref()
            .or(self.test_name.as_deref())
            .unwrap_or("(document)")
    }
}

/// Evaluate every rule of `catalog` against `document`, in catalog order.
pub fn evaluate(document: &ManifestDocument, catalog: &RuleCatalog) -> Vec<ValidationResult> {
    evaluate_rules(document, catalog.rules().iter())
}

/// Evaluate against the standard catalog.
pub fn validate_manifest(document: &ManifestDocument) -> Vec<ValidationResult> {
    evaluate(document, standard_catalog())
}

/// Evaluate a single rule.
pub fn evaluate_rule(document: &ManifestDocument, rule: &Rule) -> ValidationResult {
    let outcome = match (rule.member, rule.check) {
        (Some(member), check) => {
            let Some(value) = document.get(member) else {
                return ValidationResult::missing(rule, member);
            };
            match check {
                Check::Presence => Some(Outcome::Pass),
                Check::Member(predicate) => guarded(rule, || predicate(value)),
                // `RuleCatalog::new` rejects this pairing; a hand-built rule
                // gets the same verdict as any other unevaluable rule.
                Check::Document(_) => None,
            }
        }
        (None, Check::Document(predicate)) => guarded(rule, || predicate(document)),
        (None, _) => None,
    };

    let result = match outcome {
        Some(outcome) => ValidationResult::from_outcome(rule, outcome),
        None => ValidationResult::unevaluated(rule),
    };
    if !result.valid {
        tracing::debug!(
            rule = rule.label(),
            test = rule.test_name.unwrap_or(""),
            category = %rule.category,
            "rule failed"
        );
    }
    result
}

/// Results of the required-category rules only, in catalog order.
pub fn validate_required(document: &ManifestDocument, catalog: &RuleCatalog) -> Vec<ValidationResult> {
    evaluate_rules(
        document,
        catalog.rules().iter().filter(|r| r.category == Category::Required),
    )
}

/// True when every required rule passes.
pub fn is_install_ready(document: &ManifestDocument, catalog: &RuleCatalog) -> bool {
    validate_required(document, catalog).iter().all(|r| r.valid)
}

/// Failing optional rules whose member is present: things that are in
/// the manifest but could be better.
pub fn validate_improvements(document: &ManifestDocument, catalog: &RuleCatalog) -> Vec<ValidationResult> {
    evaluate_rules(
        document,
        catalog
            .rules()
            .iter()
            .filter(|r| r.category == Category::Optional)
            .filter(|r| r.member.is_some_and(|m| document.contains(m))),
    )
    .into_iter()
    .filter(|r| !r.valid)
    .collect()
}

/// Verdict on one member value checked in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVerdict {
    /// True when every rule for the member passes.
    pub valid: bool,
    /// Error strings of the failing rules, in catalog order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Check a single member value against every rule for that member.
///
/// Used while a user is editing one field. A member the catalog does not
/// know is valid.
pub fn validate_single_field(member: &str, value: &Value, catalog: &RuleCatalog) -> FieldVerdict {
    let mut errors = Vec::new();
    for rule in catalog.rules_for(member) {
        let outcome = match rule.check {
            Check::Presence => Some(Outcome::Pass),
            Check::Member(predicate) => guarded(rule, || predicate(value)),
            Check::Document(_) => None,
        };
        let result = match outcome {
            Some(outcome) => ValidationResult::from_outcome(rule, outcome),
            None => ValidationResult::unevaluated(rule),
        };
        if let Some(error) = result.error_string {
            errors.push(error);
        }
    }
    FieldVerdict {
        valid: errors.is_empty(),
        errors,
    }
}

/// Catalog members absent from the document, in catalog order.
pub fn report_missing(document: &ManifestDocument, catalog: &RuleCatalog) -> Vec<String> {
    catalog
        .members()
        .into_iter()
        .filter(|m| !document.contains(m))
        .map(str::to_string)
        .collect()
}

fn evaluate_rules<'a>(
    document: &ManifestDocument,
    rules: impl Iterator<Item = &'a Rule>,
) -> Vec<ValidationResult> {
    let span = tracing::debug_span!("evaluate", members = document.len());
    let _guard = span.enter();

    let results: Vec<ValidationResult> = rules.map(|rule| evaluate_rule(document, rule)).collect();
    tracing::debug!(
        rules = results.len(),
        failed = results.iter().filter(|r| !r.valid).count(),
        "manifest evaluated"
    );
    results
}

fn guarded(rule: &Rule, predicate: impl FnOnce() -> Outcome) -> Option<Outcome> {
    match panic::catch_unwind(AssertUnwindSafe(predicate)) {
        Ok(outcome) => Some(outcome),
        Err(_) => {
            tracing::warn!(rule = rule.label(), "predicate panicked; reporting rule as failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ManifestDocument {
        ManifestDocument::from_value(value).unwrap()
    }

    fn packageable_manifest() -> ManifestDocument {
        doc(json!({
            "name": "My App",
            "short_name": "App",
            "start_url": "/",
            "display": "standalone",
            "background_color": "#fff",
            "theme_color": "#fff",
            "icons": [{ "src": "a.png", "sizes": "512x512", "type": "image/png" }]
        }))
    }

    fn find<'a>(results: &'a [ValidationResult], member: &str, test: Option<&str>) -> &'a ValidationResult {
        results
            .iter()
            .find(|r| r.member.as_deref() == Some(member) && r.test_name.as_deref() == test)
            .unwrap_or_else(|| panic!("no result for {member} {test:?}"))
    }

    #[test]
    fn one_result_per_rule_in_catalog_order() {
        let results = validate_manifest(&packageable_manifest());
        assert_eq!(results.len(), standard_catalog().len());
        for (result, rule) in results.iter().zip(standard_catalog().rules()) {
            assert_eq!(result.member.as_deref(), rule.member);
            assert_eq!(result.test_name.as_deref(), rule.test_name);
            assert_eq!(result.category, rule.category);
        }
    }

    #[test]
    fn packageable_manifest_passes_required_rules() {
        let results = validate_manifest(&packageable_manifest());
        for result in results.iter().filter(|r| r.category == Category::Required) {
            assert!(result.valid, "{} {:?} failed: {:?}", result.label(), result.test_name, result.error_string);
        }
        assert!(is_install_ready(&packageable_manifest(), standard_catalog()));
    }

    #[test]
    fn empty_manifest_fails_every_rule_as_missing() {
        let results = validate_manifest(&ManifestDocument::empty());
        assert!(results.iter().all(|r| !r.valid && r.missing));
        let name = find(&results, "name", None);
        assert_eq!(
            name.error_string.as_deref(),
            Some("manifest is missing required field `name`")
        );
        let orientation = find(&results, "orientation", None);
        assert_eq!(
            orientation.error_string.as_deref(),
            Some("manifest is missing recommended field `orientation`")
        );
    }

    #[test]
    fn missing_name_never_reports_whitespace_as_valid() {
        let document = packageable_manifest();
        let mut map = document.as_map().clone();
        map.remove("name");
        let results = validate_manifest(&ManifestDocument::from_map(map));

        let presence = find(&results, "name", None);
        assert!(!presence.valid);
        assert!(presence.missing);
        let whitespace = find(&results, "name", Some("whitespace"));
        assert!(!whitespace.valid);
    }

    #[test]
    fn whitespace_fix_is_suggested() {
        let document = packageable_manifest().with_member("name", json!(" Foo "));
        let results = validate_manifest(&document);

        let whitespace = find(&results, "name", Some("whitespace"));
        assert!(!whitespace.valid);
        assert!(!whitespace.missing);
        assert_eq!(whitespace.suggested_fix, Some(json!("Foo")));
        assert_eq!(
            whitespace.error_string.as_deref(),
            Some("name should not have any leading or trailing whitespace")
        );

        // The presence rule itself is satisfied by a padded string.
        assert!(find(&results, "name", None).valid);
    }

    #[test]
    fn short_name_padding_fails_both_rules() {
        let document = packageable_manifest().with_member("short_name", json!("App "));
        let results = validate_manifest(&document);
        let presence = find(&results, "short_name", None);
        assert!(!presence.valid);
        assert!(presence.suggested_fix.is_none());
        assert_eq!(
            find(&results, "short_name", Some("whitespace")).suggested_fix,
            Some(json!("App"))
        );
    }

    #[test]
    fn hex_colors_through_engine() {
        for (color, expected) in [("#ABC", true), ("#ABC1", false), ("red", false), ("#AABBCC", true)] {
            let document = packageable_manifest().with_member("background_color", json!(color));
            let results = validate_manifest(&document);
            assert_eq!(find(&results, "background_color", None).valid, expected, "{color}");
        }
    }

    #[test]
    fn shortcuts_with_webp_icon_fail() {
        let document = packageable_manifest()
            .with_member("shortcuts", json!([{ "icons": [{ "type": "image/webp" }] }]));
        let results = validate_manifest(&document);
        let shortcuts = find(&results, "shortcuts", None);
        assert!(!shortcuts.valid);
        assert!(!shortcuts.missing);
        assert_eq!(
            shortcuts.error_string.as_deref(),
            Some("shortcuts should be an array with a length > 0 and should not include webp images")
        );
    }

    #[test]
    fn passing_results_carry_no_error() {
        let results = validate_manifest(&packageable_manifest());
        for result in results.iter().filter(|r| r.valid) {
            assert!(result.error_string.is_none());
            assert!(result.suggested_fix.is_none());
        }
    }

    #[test]
    fn unknown_members_are_ignored() {
        let plain = validate_manifest(&packageable_manifest());
        let extra = validate_manifest(&packageable_manifest().with_member("x_custom", json!({"a": 1})));
        assert_eq!(plain, extra);
    }

    #[test]
    fn evaluation_does_not_mutate_document() {
        let document = packageable_manifest().with_member("name", json!(" Foo "));
        let before = document.clone();
        let _ = validate_manifest(&document);
        assert_eq!(document, before);
    }

    #[test]
    fn panicking_predicate_is_contained() {
        fn explode(_: &Value) -> Outcome {
            panic!("unexpected shape")
        }
        let catalog = RuleCatalog::new(vec![
            Rule::member("name", Category::Required, Check::Member(explode)),
            Rule::member("start_url", Category::Required, Check::Presence),
        ])
        .unwrap();

        let results = evaluate(&packageable_manifest(), &catalog);
        assert_eq!(results.len(), 2);
        assert!(!results[0].valid);
        assert_eq!(
            results[0].error_string.as_deref(),
            Some("could not evaluate rule for `name`")
        );
        assert!(results[1].valid);
    }

    #[test]
    fn document_check_on_member_rule_is_unevaluated() {
        fn always_pass(_: &ManifestDocument) -> Outcome {
            Outcome::Pass
        }
        let mut rule = Rule::document("scope", Category::Optional, always_pass);
        rule.member = Some("name");

        let result = evaluate_rule(&packageable_manifest(), &rule);
        assert!(!result.valid);
        assert!(!result.missing);
        assert_eq!(
            result.error_string.as_deref(),
            Some("could not evaluate rule for `name`")
        );
    }

    #[test]
    fn document_rules_see_siblings() {
        fn start_url_in_scope(document: &ManifestDocument) -> Outcome {
            let scope = document.get("scope").and_then(Value::as_str).unwrap_or("/");
            match document.get("start_url").and_then(Value::as_str) {
                Some(url) if url.starts_with(scope) => Outcome::Pass,
                Some(_) => Outcome::fail_with("start_url is outside the app scope"),
                None => Outcome::fail(),
            }
        }
        let catalog = RuleCatalog::new(vec![Rule::document(
            "start_url_scope",
            Category::Optional,
            start_url_in_scope,
        )])
        .unwrap();

        let inside = evaluate(&packageable_manifest().with_member("scope", json!("/")), &catalog);
        assert!(inside[0].valid);
        assert_eq!(inside[0].member, None);
        assert_eq!(inside[0].label(), "start_url_scope");

        let outside = evaluate(&packageable_manifest().with_member("scope", json!("/app")), &catalog);
        assert!(!outside[0].valid);
        assert!(!outside[0].missing);
        assert_eq!(
            outside[0].error_string.as_deref(),
            Some("start_url is outside the app scope")
        );
    }

    #[test]
    fn required_subset() {
        let results = validate_required(&ManifestDocument::empty(), standard_catalog());
        assert_eq!(results.len(), 9);
        assert!(results.iter().all(|r| r.category == Category::Required));
        assert!(!is_install_ready(&ManifestDocument::empty(), standard_catalog()));
    }

    #[test]
    fn improvements_only_cover_present_optional_members() {
        let document = packageable_manifest()
            .with_member("lang", json!(""))
            .with_member("description", json!(" padded "));
        let improvements = validate_improvements(&document, standard_catalog());
        let labels: Vec<(&str, Option<&str>)> = improvements
            .iter()
            .map(|r| (r.label(), r.test_name.as_deref()))
            .collect();
        assert_eq!(
            labels,
            vec![("lang", None), ("description", Some("whitespace"))]
        );
    }

    #[test]
    fn single_field_validation() {
        let catalog = standard_catalog();
        assert_eq!(
            validate_single_field("short_name", &json!("Webboard"), catalog),
            FieldVerdict { valid: true, errors: vec![] }
        );

        let verdict = validate_single_field("theme_color", &json!("black"), catalog);
        assert!(!verdict.valid);
        assert_eq!(verdict.errors, vec!["theme_color is required and should be a valid hex color"]);

        let verdict = validate_single_field("name", &json!(" Padded"), catalog);
        assert!(!verdict.valid);
        assert_eq!(verdict.errors.len(), 1);

        assert!(validate_single_field("scope", &json!(42), catalog).valid);
    }

    #[test]
    fn missing_members_report() {
        let missing = report_missing(&packageable_manifest(), standard_catalog());
        assert!(!missing.contains(&"name".to_string()));
        assert!(missing.contains(&"iarc_rating_id".to_string()));
        assert_eq!(missing.first().map(String::as_str), Some("orientation"));
        assert_eq!(report_missing(&ManifestDocument::empty(), standard_catalog()).len(), 17);
    }

    #[test]
    fn result_serializes_without_empty_fields() {
        let results = validate_manifest(&packageable_manifest());
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["member"], "icons");
        assert_eq!(json["category"], "required");
        assert_eq!(json["valid"], true);
        assert!(json.get("error_string").is_none());
        assert!(json.get("suggested_fix").is_none());
    }
}
