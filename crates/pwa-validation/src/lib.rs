//! # pwa-validation — Web App Manifest Validation
//!
//! Decides whether a web app manifest is complete and correct enough to
//! package as an installable app, and explains every deficiency in a form
//! an editor or report can render.
//!
//! ## Architecture
//!
//! - [`catalog`] — the canonical, ordered list of [`Rule`]s. One source of
//!   truth for scoring, diagnostics and generators.
//! - [`engine`] — runs a catalog over a [`ManifestDocument`], one
//!   [`ValidationResult`] per rule in catalog order.
//! - [`score`] — folds results into an [`AggregateScore`]; a manifest is
//!   packageable when no required rule failed.
//! - [`report`] — display ordering, to-do items, missing-member groups.
//! - [`fix`] — quick fixes from suggested values and catalog defaults.
//! - [`workspace`] — per-session state for open manifests, re-validated
//!   on content change.
//!
//! ## Crate Policy
//!
//! - Evaluation is pure: documents are never mutated, and the same
//!   document always yields the same results.
//! - A predicate failure (even a panic) affects only its own rule.
//! - Depends only on `pwa-core` internally.

pub mod catalog;
pub mod engine;
pub mod fix;
pub mod predicates;
pub mod report;
pub mod rule;
pub mod score;
pub mod workspace;

pub use catalog::{standard_catalog, CatalogError, RuleCatalog};
pub use engine::{
    evaluate, evaluate_rule, is_install_ready, report_missing, validate_improvements,
    validate_manifest, validate_required, validate_single_field, FieldVerdict, ValidationResult,
};
pub use fix::{apply_fixes, plan_fixes, quick_fix_for, FixKind, QuickFix};
pub use report::{sort_for_display, todo_items, ManifestReport, MissingFields, TodoItem};
pub use rule::{Check, Outcome, Rule};
pub use score::AggregateScore;
pub use workspace::{DocumentState, UpdateOutcome, WorkspaceContext};

pub use pwa_core::{Category, ManifestDocument};
