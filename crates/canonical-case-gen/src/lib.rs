// crates/canonical-case-gen/src/lib.rs
// ============================================================================
// Module: Canonical Case Generator Library
// Description: Deterministic generator for catalog-driven `test_case` modules.
// Purpose: Render `canonical_cases/mod.rs` from the `canonical.yaml` catalog.
// Dependencies: serde, serde_yaml, toml, thiserror
// ============================================================================

//! ## Overview
//! This crate turns a versioned YAML catalog of named test definitions into a
//! generated Rust module with one `#[test_case]` registration per definition.
//! Each definition is re-serialized to canonical YAML and embedded verbatim;
//! the generated footer parses it back into the runner's case type at test
//! time.
//!
//! ### Design Notes
//! - Definitions are opaque [`serde_yaml::Value`] trees; the generator never
//!   interprets them.
//! - Output order follows catalog order. With key sorting enabled (the
//!   default) the text of each block is independent of mapping edit order.
//! - The output directory is owned by the generator and fully replaced on
//!   every run. The catalog is validated before anything is removed.
//!
//! ## Index
//! - Operations: [`generate`], [`check`]
//! - Inputs: [`Catalog`], [`GeneratorConfig`]
//! - Rendering: [`render_module`], [`canonical_yaml`], [`display_name`]
//! - Errors: [`CodegenError`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod render;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::MAX_CATALOG_BYTES;
pub use catalog::TestEntry;
pub use catalog::display_name;
pub use config::DEFAULT_CATALOG_PATH;
pub use config::DEFAULT_OUTPUT_DIR;
pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::GenerationReport;
pub use generator::check;
pub use generator::generate;
pub use render::GENERATOR_NAME;
pub use render::canonical_yaml;
pub use render::render_module;
