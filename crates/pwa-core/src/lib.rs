//! # pwa-core — Foundational Types for PWA Studio
//!
//! Leaf crate of the workspace. Defines the types every other crate
//! shares when talking about a web app manifest:
//!
//! - [`ManifestDocument`] — a parsed manifest, a JSON object keyed by
//!   member name. Parsing happens here, before any rule is evaluated.
//! - [`Category`] — the severity bucket of a manifest check
//!   (`required`, `recommended`, `optional`).
//! - [`ManifestDigest`] — SHA-256 over a document's serialized form, used
//!   to tell whether a manifest changed between validation passes.
//! - [`PwaError`] / [`DocumentParseError`] — the error taxonomy.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pwa-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod digest;
pub mod document;
pub mod error;

pub use category::Category;
pub use digest::ManifestDigest;
pub use document::ManifestDocument;
pub use error::{DocumentParseError, PwaError};
