//! # Rules
//!
//! A [`Rule`] is one checkable aspect of a manifest: which member it
//! inspects, how severe a failure is, the predicate itself, and the text a
//! consumer needs to render the result. Rules are plain data; the engine
//! in [`crate::engine`] is the only code that runs them.

use std::fmt;

use pwa_core::{Category, ManifestDocument};
use serde_json::Value;

/// Predicate over a single member's value.
pub type MemberPredicate = fn(&Value) -> Outcome;

/// Predicate over the whole document, for rules that need sibling members.
pub type DocumentPredicate = fn(&ManifestDocument) -> Outcome;

/// Verdict of one predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The check passed.
    Pass,
    /// The check failed with no automatic correction. `None` means the
    /// rule's own error string describes the failure.
    Fail(Option<String>),
    /// The check failed, and the carried value is the corrected member
    /// value (for example the trimmed form of a padded string).
    FailWithFix(Value),
}

impl Outcome {
    /// A failure described by the rule's error string.
    pub fn fail() -> Self {
        Self::Fail(None)
    }

    /// A failure with its own message.
    pub fn fail_with(reason: impl Into<String>) -> Self {
        Self::Fail(Some(reason.into()))
    }

    /// `Pass` for `true`, `Fail(None)` for `false`.
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::fail()
        }
    }

    /// Returns true for [`Outcome::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// What a rule evaluates.
#[derive(Clone, Copy)]
pub enum Check {
    /// Passes whenever the member is present.
    Presence,
    /// Runs a predicate over the member's value.
    Member(MemberPredicate),
    /// Runs a predicate over the whole document. Only valid for rules
    /// without a member.
    Document(DocumentPredicate),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presence => f.write_str("Presence"),
            Self::Member(_) => f.write_str("Member(<predicate>)"),
            Self::Document(_) => f.write_str("Document(<predicate>)"),
        }
    }
}

/// One manifest check plus its presentation metadata.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Manifest member this rule inspects; `None` for whole-document rules.
    pub member: Option<&'static str>,
    /// Distinguishes several rules on the same member (e.g. `"whitespace"`).
    pub test_name: Option<&'static str>,
    /// Severity bucket.
    pub category: Category,
    /// The predicate.
    pub check: Check,
    /// Builds the value inserted when the member is absent and the user
    /// accepts a fix.
    pub default_value: Option<fn() -> Value>,
    /// Explanation shown when the rule fails.
    pub error_string: &'static str,
    /// Short label for scorecards, e.g. "Contains name property".
    pub display_string: &'static str,
    /// Longer description of the member.
    pub info_string: Option<&'static str>,
    /// Reference documentation.
    pub docs_link: Option<&'static str>,
}

impl Rule {
    /// A rule over one manifest member.
    pub fn member(member: &'static str, category: Category, check: Check) -> Self {
        Self {
            member: Some(member),
            test_name: None,
            category,
            check,
            default_value: None,
            error_string: "",
            display_string: member,
            info_string: None,
            docs_link: None,
        }
    }

    /// A whole-document rule.
    pub fn document(name: &'static str, category: Category, predicate: DocumentPredicate) -> Self {
        Self {
            member: None,
            test_name: Some(name),
            category,
            check: Check::Document(predicate),
            default_value: None,
            error_string: "",
            display_string: name,
            info_string: None,
            docs_link: None,
        }
    }

    pub fn with_test_name(mut self, test_name: &'static str) -> Self {
        self.test_name = Some(test_name);
        self
    }

    pub fn with_default(mut self, default_value: fn() -> Value) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn with_error(mut self, error_string: &'static str) -> Self {
        self.error_string = error_string;
        self
    }

    pub fn with_display(mut self, display_string: &'static str) -> Self {
        self.display_string = display_string;
        self
    }

    pub fn with_info(mut self, info_string: &'static str) -> Self {
        self.info_string = Some(info_string);
        self
    }

    pub fn with_docs(mut self, docs_link: &'static str) -> Self {
        self.docs_link = Some(docs_link);
        self
    }

    /// The `(member, test_name)` pair that identifies this rule in a catalog.
    pub fn key(&self) -> (Option<&'static str>, Option<&'static str>) {
        (self.member, self.test_name)
    }

    /// Build the default value, if the rule has one.
    pub fn make_default(&self) -> Option<Value> {
        self.default_value.map(|build| build())
    }

    /// Name used in messages: the member, or the test name of a
    /// whole-document rule.
    pub fn label(&self) -> &'static str {
        self.member.or(self.test_name).unwrap_or("(document)")
    }
}
