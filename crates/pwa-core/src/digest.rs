//! # Manifest Digest
//!
//! SHA-256 over the serialized form of a [`ManifestDocument`]. The
//! document's map is key-ordered, so two documents with the same members
//! and values produce the same digest regardless of the member order in
//! the source text. Whitespace and formatting changes in the file do not
//! change the digest either.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::document::ManifestDocument;
use crate::error::PwaError;

/// A SHA-256 digest of a manifest document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManifestDigest {
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ManifestDigest {
    /// Compute the digest of a document.
    ///
    /// # Errors
    ///
    /// Returns [`PwaError::Serialization`] if the document cannot be
    /// serialized, which only happens for non-finite numbers smuggled in
    /// through a hand-built `Value`.
    pub fn of(document: &ManifestDocument) -> Result<Self, PwaError> {
        let bytes = serde_json::to_vec(document.as_map())?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(Self {
            bytes: hasher.finalize().into(),
        })
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ManifestDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}
