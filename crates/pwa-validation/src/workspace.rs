//! # Workspace Context
//!
//! Owns the manifests a session has open and their latest reports. Each
//! open document is keyed by path; editing it re-runs validation only
//! when the document's digest changed, so reformatting a file or
//! re-saving it unchanged reuses the cached report.
//!
//! Every mutating operation takes `&mut self`, so a context runs at most
//! one validation pass at a time. Independent sessions use independent
//! contexts; they share only the immutable catalog.
//!
//! Text that does not parse is kept as [`DocumentState::Unparseable`] and
//! is never handed to the engine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pwa_core::{DocumentParseError, ManifestDocument, PwaError};

use crate::catalog::{standard_catalog, RuleCatalog};
use crate::report::ManifestReport;

/// State of one open document.
#[derive(Debug, Clone)]
pub enum DocumentState {
    /// The text parsed; `report` reflects the current content.
    Parsed {
        document: ManifestDocument,
        report: ManifestReport,
    },
    /// The text is not a JSON object.
    Unparseable(DocumentParseError),
}

/// What an [`WorkspaceContext::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The content changed and a fresh report was built.
    Revalidated,
    /// Same digest as before; the cached report was kept.
    Unchanged,
    /// The new text does not parse.
    Unparseable,
}

/// Validation state for a set of open manifests.
#[derive(Debug)]
pub struct WorkspaceContext<'c> {
    catalog: &'c RuleCatalog,
    documents: BTreeMap<PathBuf, DocumentState>,
    passes: u64,
}

impl WorkspaceContext<'static> {
    /// A context over the standard catalog.
    pub fn with_standard_catalog() -> Self {
        Self::new(standard_catalog())
    }
}

impl<'c> WorkspaceContext<'c> {
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self {
            catalog,
            documents: BTreeMap::new(),
            passes: 0,
        }
    }

    pub fn catalog(&self) -> &'c RuleCatalog {
        self.catalog
    }

    /// Open (or reopen) a document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`PwaError::Serialization`] if the parsed document cannot
    /// be digested. Parse failures are not errors; they are recorded as
    /// [`DocumentState::Unparseable`].
    pub fn open(&mut self, path: impl Into<PathBuf>, text: &str) -> Result<&DocumentState, PwaError> {
        let path = path.into();
        let state = self.validate(text)?;
        tracing::debug!(path = %path.display(), "document opened");
        self.documents.insert(path.clone(), state);
        Ok(&self.documents[&path])
    }

    /// Replace a document's text. A document not yet open is opened.
    ///
    /// # Errors
    ///
    /// Same as [`WorkspaceContext::open`].
    pub fn update(&mut self, path: impl Into<PathBuf>, text: &str) -> Result<UpdateOutcome, PwaError> {
        let path = path.into();
        let document = match ManifestDocument::parse(text) {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "document no longer parses");
                self.documents.insert(path, DocumentState::Unparseable(e));
                return Ok(UpdateOutcome::Unparseable);
            }
        };

        if let Some(DocumentState::Parsed { report, .. }) = self.documents.get(&path) {
            if report.digest == document.digest()?.to_string() {
                return Ok(UpdateOutcome::Unchanged);
            }
        }

        let state = self.validate_document(document)?;
        self.documents.insert(path, state);
        Ok(UpdateOutcome::Revalidated)
    }

    /// State of an open document.
    pub fn state(&self, path: &Path) -> Option<&DocumentState> {
        self.documents.get(path)
    }

    /// Latest report of an open, parseable document.
    pub fn report(&self, path: &Path) -> Option<&ManifestReport> {
        match self.documents.get(path)? {
            DocumentState::Parsed { report, .. } => Some(report),
            DocumentState::Unparseable(_) => None,
        }
    }

    /// Latest parsed document.
    pub fn document(&self, path: &Path) -> Option<&ManifestDocument> {
        match self.documents.get(path)? {
            DocumentState::Parsed { document, .. } => Some(document),
            DocumentState::Unparseable(_) => None,
        }
    }

    /// Forget a document. Returns true if it was open.
    pub fn close(&mut self, path: &Path) -> bool {
        self.documents.remove(path).is_some()
    }

    /// Paths of open documents, sorted.
    pub fn open_documents(&self) -> impl Iterator<Item = &Path> {
        self.documents.keys().map(PathBuf::as_path)
    }

    /// Number of evaluation passes this context has run.
    pub fn validation_passes(&self) -> u64 {
        self.passes
    }

    fn validate(&mut self, text: &str) -> Result<DocumentState, PwaError> {
        match ManifestDocument::parse(text) {
            Ok(document) => self.validate_document(document),
            Err(e) => Ok(DocumentState::Unparseable(e)),
        }
    }

    fn validate_document(&mut self, document: ManifestDocument) -> Result<DocumentState, PwaError> {
        let report = ManifestReport::build(&document, self.catalog)?;
        self.passes += 1;
        Ok(DocumentState::Parsed { document, report })
    }
}
