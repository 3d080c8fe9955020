//! # Predicates
//!
//! The pure functions the standard catalog is built from. Each receives
//! the member value only (never the document) and must not panic on any
//! JSON shape; a value of the wrong type simply fails.

use serde_json::Value;

use crate::rule::Outcome;

/// Display modes accepted by the `display` member.
pub const STANDARD_DISPLAY_MODES: [&str; 4] = ["fullscreen", "standalone", "minimal-ui", "browser"];

/// Values accepted by the `orientation` member.
pub const STANDARD_ORIENTATIONS: [&str; 8] = [
    "any",
    "natural",
    "landscape",
    "landscape-primary",
    "landscape-secondary",
    "portrait",
    "portrait-primary",
    "portrait-secondary",
];

/// A string with at least one character.
pub fn is_non_empty_string(value: &Value) -> Outcome {
    Outcome::from_bool(value.as_str().is_some_and(|s| !s.is_empty()))
}

/// A non-empty string with no leading or trailing whitespace.
pub fn is_trimmed_non_empty_string(value: &Value) -> Outcome {
    Outcome::from_bool(value.as_str().is_some_and(|s| !s.is_empty() && s.trim() == s))
}

/// An array with at least one element.
pub fn is_non_empty_array(value: &Value) -> Outcome {
    Outcome::from_bool(value.as_array().is_some_and(|a| !a.is_empty()))
}

/// `#RGB` or `#RRGGBB`, hex digits in either case.
pub fn is_hex_color(value: &Value) -> Outcome {
    Outcome::from_bool(value.as_str().is_some_and(hex_color))
}

/// One of [`STANDARD_DISPLAY_MODES`].
pub fn is_standard_display(value: &Value) -> Outcome {
    Outcome::from_bool(value.as_str().is_some_and(|s| STANDARD_DISPLAY_MODES.contains(&s)))
}

/// One of [`STANDARD_ORIENTATIONS`].
pub fn is_standard_orientation(value: &Value) -> Outcome {
    Outcome::from_bool(value.as_str().is_some_and(standard_orientation))
}

/// Passes for a string equal to its trimmed form; a padded string fails
/// with the trimmed string as the fix. Non-strings fail outright.
pub fn trimmed_fix(value: &Value) -> Outcome {
    match value.as_str() {
        Some(s) if s.trim() == s => Outcome::Pass,
        Some(s) => Outcome::FailWithFix(Value::String(s.trim().to_string())),
        None => Outcome::fail(),
    }
}

/// A non-empty array of shortcuts where no shortcut icon is WebP.
pub fn shortcuts_without_webp(value: &Value) -> Outcome {
    let Some(shortcuts) = value.as_array().filter(|a| !a.is_empty()) else {
        return Outcome::fail();
    };
    let has_webp = shortcuts
        .iter()
        .filter_map(|shortcut| shortcut.get("icons")?.as_array())
        .flatten()
        .any(|icon| icon.get("type").and_then(Value::as_str) == Some("image/webp"));
    Outcome::from_bool(!has_webp)
}

/// Every icon entry declares a non-empty `type`.
pub fn icons_declare_type(value: &Value) -> Outcome {
    every_entry_has(value, "type")
}

/// Every icon entry declares a non-empty `sizes`.
pub fn icons_declare_sizes(value: &Value) -> Outcome {
    every_entry_has(value, "sizes")
}

/// Returns true for `orientation` values from the manifest spec.
pub fn standard_orientation(s: &str) -> bool {
    STANDARD_ORIENTATIONS.contains(&s)
}

fn hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

fn every_entry_has(value: &Value, key: &str) -> Outcome {
    let Some(entries) = value.as_array() else {
        return Outcome::fail();
    };
    Outcome::from_bool(entries.iter().all(|entry| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    }))
}
