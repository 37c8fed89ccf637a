// crates/canonical-case-gen/src/error.rs
// ============================================================================
// Module: Generator Errors
// Description: Error taxonomy for catalog loading and module generation.
// Purpose: Give every fatal condition a stable, matchable variant.
// Dependencies: thiserror
// ============================================================================

//! Error type shared by every generator operation.

use thiserror::Error;

/// Errors raised while generating the canonical test module.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
/// - Every variant is fatal; callers never resume a partially processed run.
///
/// # Examples
/// ```
/// use canonical_case_gen::CodegenError;
///
/// let err = CodegenError::Schema("missing `tests`".to_string());
/// assert!(matches!(err, CodegenError::Schema(message) if message == "missing `tests`"));
/// ```
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The catalog file could not be opened or read.
    #[error("catalog io error: {0}")]
    Read(String),
    /// The catalog is not valid YAML or its root is not a mapping.
    #[error("catalog parse error: {0}")]
    Parse(String),
    /// The catalog parsed but lacks the `version`/`tests` shape.
    #[error("catalog schema error: {0}")]
    Schema(String),
    /// Removing or creating the output directory failed.
    #[error("output directory error: {0}")]
    Filesystem(String),
    /// Writing the generated module or a diagnostic line failed.
    #[error("write error: {0}")]
    Write(String),
    /// Generator configuration is unreadable or invalid.
    #[error("config error: {0}")]
    Config(String),
    /// On-disk output differs from what the catalog renders to.
    #[error("generated output drift: {0}")]
    Drift(String),
}
