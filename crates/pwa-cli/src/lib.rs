//! # pwa-cli — PWA Studio Command-Line Interface
//!
//! The `pwa-studio` binary. Parses arguments, loads configuration, and
//! renders output; every verdict comes from `pwa-validation`.
//!
//! ## Subcommands
//!
//! - `validate` — full report on a manifest file
//! - `fix` — apply quick fixes and write the manifest back
//! - `field` — check one member value in isolation
//! - `missing` — list absent members by category
//! - `rules` — print the rule catalog
//!
//! ## Exit codes
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | manifest passes the configured gate |
//! | 1 | gate failed (or an unexpected error) |
//! | 2 | manifest unreadable or not a JSON object |

use std::path::Path;

use pwa_core::ManifestDocument;

pub mod config;
pub mod field;
pub mod fix;
pub mod missing;
pub mod rules;
pub mod validate;

/// Manifest passes the gate.
pub const EXIT_OK: u8 = 0;
/// A rule at or above the gate category failed.
pub const EXIT_GATE_FAILED: u8 = 1;
/// The manifest could not be read or parsed.
pub const EXIT_UNREADABLE: u8 = 2;

/// Load a manifest, printing the parse error and returning the exit code
/// on failure.
pub(crate) fn load_manifest(path: &Path) -> Result<ManifestDocument, u8> {
    ManifestDocument::load(path).map_err(|e| {
        tracing::debug!(path = %path.display(), "manifest rejected before evaluation");
        eprintln!("error: {e}");
        EXIT_UNREADABLE
    })
}

/// Exit code for a gate verdict.
pub(crate) fn gate_code(failed: bool) -> u8 {
    if failed {
        EXIT_GATE_FAILED
    } else {
        EXIT_OK
    }
}
