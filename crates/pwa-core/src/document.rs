//! # Manifest Document
//!
//! A parsed web app manifest: a JSON object mapping member names to
//! arbitrary JSON values. Documents come from a file, an HTTP fetch, or
//! are built empty; the validation engine only ever reads them.
//!
//! Parsing is the trust boundary. Text that is not a JSON object is
//! rejected here with a [`DocumentParseError`] and never handed to the
//! engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::digest::ManifestDigest;
use crate::error::{DocumentParseError, PwaError};

/// A parsed web app manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestDocument {
    members: Map<String, Value>,
}

impl ManifestDocument {
    /// An empty manifest, `{}`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-built JSON object.
    pub fn from_map(members: Map<String, Value>) -> Self {
        Self { members }
    }

    /// Accept a JSON value as a document if it is an object.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentParseError::NotAnObject`] for arrays, strings,
    /// numbers, booleans and `null`.
    pub fn from_value(value: Value) -> Result<Self, DocumentParseError> {
        match value {
            Value::Object(members) => Ok(Self { members }),
            other => Err(DocumentParseError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Parse manifest text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentParseError::NotJson`] if the text is not JSON and
    /// [`DocumentParseError::NotAnObject`] if it is JSON but not an object.
    pub fn parse(text: &str) -> Result<Self, DocumentParseError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DocumentParseError::NotJson {
                reason: e.to_string(),
            })?;
        Self::from_value(value)
    }

    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentParseError::Load`] if the file cannot be read,
    /// otherwise the errors of [`ManifestDocument::parse`].
    pub fn load(path: &Path) -> Result<Self, DocumentParseError> {
        let text = std::fs::read_to_string(path).map_err(|e| DocumentParseError::Load {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::parse(&text)
    }

    /// Look up a member's value.
    pub fn get(&self, member: &str) -> Option<&Value> {
        self.members.get(member)
    }

    /// Returns true if the member is present, whatever its value.
    pub fn contains(&self, member: &str) -> bool {
        self.members.contains_key(member)
    }

    /// Member names, in key order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true for `{}`.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.members
    }

    /// Clone into a `serde_json::Value::Object`.
    pub fn to_value(&self) -> Value {
        Value::Object(self.members.clone())
    }

    /// Returns a copy of this document with `member` set to `value`.
    pub fn with_member(&self, member: &str, value: Value) -> Self {
        let mut members = self.members.clone();
        members.insert(member.to_string(), value);
        Self { members }
    }

    /// Serialize as indented JSON, the way manifests are written to disk.
    ///
    /// # Errors
    ///
    /// Returns [`PwaError::Serialization`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, PwaError> {
        Ok(serde_json::to_string_pretty(&self.members)?)
    }

    /// SHA-256 digest of this document.
    ///
    /// # Errors
    ///
    /// Returns [`PwaError::Serialization`] if serialization fails.
    pub fn digest(&self) -> Result<ManifestDigest, PwaError> {
        ManifestDigest::of(self)
    }
}

impl From<Map<String, Value>> for ManifestDocument {
    fn from(members: Map<String, Value>) -> Self {
        Self::from_map(members)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing an object literal always yields a document with the same members.
        #[test]
        fn parse_preserves_members(map in prop::collection::btree_map("[a-z_]{1,12}", "[ -~]{0,20}", 0..10)) {
            let value = serde_json::to_value(&map).unwrap();
            let text = serde_json::to_string(&value).unwrap();
            let doc = ManifestDocument::parse(&text).unwrap();
            prop_assert_eq!(doc.len(), map.len());
            for (k, v) in &map {
                prop_assert_eq!(doc.get(k), Some(&Value::String(v.clone())));
            }
        }

        /// Parsing never panics on arbitrary text.
        #[test]
        fn parse_never_panics(text in ".{0,64}") {
            let _ = ManifestDocument::parse(&text);
        }
    }
}
