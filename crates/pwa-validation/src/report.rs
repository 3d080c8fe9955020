//! # Manifest Report
//!
//! Presentation-side views over one evaluation: the display ordering of
//! results, the to-do list a user works through, the missing members
//! grouped by category, and [`ManifestReport`], which bundles all of it
//! with the score and the document digest.
//!
//! Nothing here changes a verdict. Catalog order remains the order the
//! engine returns; [`sort_for_display`] is an explicit reordering for
//! humans.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use pwa_core::{Category, ManifestDocument, PwaError};
use serde::{Deserialize, Serialize};

use crate::catalog::RuleCatalog;
use crate::engine::{evaluate, ValidationResult};
use crate::score::AggregateScore;

/// Reorder results for display: failures first, by category rank
/// (required, recommended, optional), then passes. Ties break
/// alphabetically on the member label. The sort is stable, so rules on
/// the same member keep their catalog order.
pub fn sort_for_display(results: &mut [ValidationResult]) {
    results.sort_by(display_order);
}

fn display_order(a: &ValidationResult, b: &ValidationResult) -> Ordering {
    a.valid
        .cmp(&b.valid)
        .then_with(|| a.category.rank().cmp(&b.category.rank()))
        .then_with(|| a.label().cmp(b.label()))
}

/// One entry in the list of things to fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Member label the item is about.
    pub field: String,
    /// What needs fixing: the rule's error string.
    pub fix: String,
    /// Category of the failing rule.
    pub status: Category,
}

/// One [`TodoItem`] per failed result, in display order.
pub fn todo_items(results: &[ValidationResult]) -> Vec<TodoItem> {
    let mut failed: Vec<&ValidationResult> = results.iter().filter(|r| !r.valid).collect();
    failed.sort_by(|a, b| display_order(a, b));
    failed
        .into_iter()
        .map(|r| TodoItem {
            field: r.label().to_string(),
            fix: r.error_string.clone().unwrap_or_default(),
            status: r.category,
        })
        .collect()
}

/// Members absent from a document, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFields {
    pub required: Vec<String>,
    pub recommended: Vec<String>,
    pub optional: Vec<String>,
}

impl MissingFields {
    /// Group the catalog members absent from `document`. A member appears
    /// once, under the category of its first rule.
    pub fn collect(document: &ManifestDocument, catalog: &RuleCatalog) -> Self {
        let mut missing = Self::default();
        for member in catalog.members() {
            if document.contains(member) {
                continue;
            }
            let Some(category) = catalog.category_of(member) else {
                continue;
            };
            missing.bucket_mut(category).push(member.to_string());
        }
        missing
    }

    /// Missing members of one category.
    pub fn of(&self, category: Category) -> &[String] {
        match category {
            Category::Required => &self.required,
            Category::Recommended => &self.recommended,
            Category::Optional => &self.optional,
        }
    }

    pub fn len(&self) -> usize {
        self.required.len() + self.recommended.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Required => &mut self.required,
            Category::Recommended => &mut self.recommended,
            Category::Optional => &mut self.optional,
        }
    }
}

/// A complete report on one manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestReport {
    /// `sha256:<hex>` digest of the evaluated document.
    pub digest: String,
    pub generated_at: DateTime<Utc>,
    /// Results in catalog order.
    pub results: Vec<ValidationResult>,
    pub score: AggregateScore,
    pub todo: Vec<TodoItem>,
    pub missing: MissingFields,
}

impl ManifestReport {
    /// Evaluate `document` and assemble the report.
    ///
    /// # Errors
    ///
    /// Returns [`PwaError::Serialization`] if the document cannot be
    /// digested.
    pub fn build(document: &ManifestDocument, catalog: &RuleCatalog) -> Result<Self, PwaError> {
        let digest = document.digest()?;
        let results = evaluate(document, catalog);
        let score = AggregateScore::aggregate(&results);
        let todo = todo_items(&results);
        let missing = MissingFields::collect(document, catalog);
        tracing::info!(%digest, %score, "manifest report built");
        Ok(Self {
            digest: digest.to_string(),
            generated_at: Utc::now(),
            results,
            score,
            todo,
            missing,
        })
    }

    /// Shorthand for `self.score.is_packageable()`.
    pub fn is_packageable(&self) -> bool {
        self.score.is_packageable()
    }

    /// True when any rule of `gate` or a stricter category failed.
    pub fn fails_gate(&self, gate: Category) -> bool {
        self.score.fails_gate(gate)
    }

    /// Results reordered for display.
    pub fn sorted_results(&self) -> Vec<ValidationResult> {
        let mut results = self.results.clone();
        sort_for_display(&mut results);
        results
    }
}
