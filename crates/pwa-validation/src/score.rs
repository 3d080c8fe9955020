//! # Aggregate Score
//!
//! Counts over one evaluation, used to decide whether the manifest is good
//! enough to package.
//!
//! The counters always satisfy
//! `passed_count + required_fail_count + recommended_fail_count + optional_fail_count == total_rules`.

use pwa_core::Category;
use serde::{Deserialize, Serialize};

use crate::engine::ValidationResult;

/// Pass/fail counts for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub total_rules: usize,
    pub passed_count: usize,
    pub required_fail_count: usize,
    pub recommended_fail_count: usize,
    pub optional_fail_count: usize,
}

impl AggregateScore {
    /// Count a set of results.
    pub fn aggregate(results: &[ValidationResult]) -> Self {
        let mut score = Self::default();
        for result in results {
            score.record(result);
        }
        score
    }

    /// Add one result to the counts.
    pub fn record(&mut self, result: &ValidationResult) {
        self.total_rules += 1;
        if result.valid {
            self.passed_count += 1;
            return;
        }
        match result.category {
            Category::Required => self.required_fail_count += 1,
            Category::Recommended => self.recommended_fail_count += 1,
            Category::Optional => self.optional_fail_count += 1,
        }
    }

    /// Merge another score into this one.
    pub fn merge(&mut self, other: &AggregateScore) {
        self.total_rules += other.total_rules;
        self.passed_count += other.passed_count;
        self.required_fail_count += other.required_fail_count;
        self.recommended_fail_count += other.recommended_fail_count;
        self.optional_fail_count += other.optional_fail_count;
    }

    /// A manifest can be packaged when no required rule failed.
    pub fn is_packageable(&self) -> bool {
        self.required_fail_count == 0
    }

    pub fn failed_count(&self) -> usize {
        self.required_fail_count + self.recommended_fail_count + self.optional_fail_count
    }

    /// Failures in one category.
    pub fn failures_in(&self, category: Category) -> usize {
        match category {
            Category::Required => self.required_fail_count,
            Category::Recommended => self.recommended_fail_count,
            Category::Optional => self.optional_fail_count,
        }
    }

    /// True when any rule of `gate` or a stricter category failed.
    pub fn fails_gate(&self, gate: Category) -> bool {
        Category::all()
            .iter()
            .filter(|c| c.rank() <= gate.rank())
            .any(|c| self.failures_in(*c) > 0)
    }

    /// Fraction of rules that passed, `1.0` for an empty evaluation.
    pub fn pass_ratio(&self) -> f64 {
        if self.total_rules == 0 {
            1.0
        } else {
            self.passed_count as f64 / self.total_rules as f64
        }
    }
}

impl std::fmt::Display for AggregateScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} passed ({} required, {} recommended, {} optional failing)",
            self.passed_count,
            self.total_rules,
            self.required_fail_count,
            self.recommended_fail_count,
            self.optional_fail_count
        )
    }
}
