// crates/canonical-case-gen/src/generator.rs
// ============================================================================
// Module: Generator Operations
// Description: The `generate` and `check` passes over a test catalog.
// Purpose: Sequence load, report, render, and write into one linear run.
// Dependencies: catalog, render, output
// ============================================================================

//! ## Overview
//! [`generate`] is a single linear pass: validate the config, load and shape
//! check the catalog, confirm the output directory does not hold the catalog,
//! report on the diagnostics sink, render in memory, then replace the output
//! directory. Nothing on disk is touched until the catalog
//! has loaded cleanly, so a malformed catalog leaves a previous generation in
//! place.
//!
//! [`check`] renders the same module and compares it with what is on disk
//! without mutating anything.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use crate::Catalog;
use crate::CodegenError;
use crate::GeneratorConfig;
use crate::display_name;
use crate::output::list_output_dir;
use crate::output::read_module;
use crate::output::reset_output_dir;
use crate::output::write_module;
use crate::render::render_module;

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Summary of a completed generate or check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Catalog version as printed on the diagnostics stream.
    pub version: String,
    /// Number of entry blocks rendered.
    pub entries: usize,
    /// Path of the generated module.
    pub module_path: PathBuf,
    /// Display names derived from more than one catalog key.
    pub duplicate_names: Vec<String>,
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Regenerates the output directory from the catalog.
///
/// Writes `version <v>` and `loaded <n> tests` to `diagnostics`, plus one
/// warning line per display name shared by several keys.
///
/// # Errors
///
/// Returns [`CodegenError`] on any failure; all failures abort the run.
pub fn generate<W: Write>(
    config: &GeneratorConfig,
    diagnostics: &mut W,
) -> Result<GenerationReport, CodegenError> {
    let (report, source) = prepare(config, diagnostics)?;
    reset_output_dir(&config.output_dir)?;
    write_module(&report.module_path, &source)?;
    Ok(report)
}

/// Verifies the output directory matches what the catalog renders to.
///
/// # Errors
///
/// Returns [`CodegenError::Drift`] when the module is missing or differs, or
/// when the output directory holds anything besides the module.
pub fn check<W: Write>(
    config: &GeneratorConfig,
    diagnostics: &mut W,
) -> Result<GenerationReport, CodegenError> {
    let (report, source) = prepare(config, diagnostics)?;
    let Some(existing) = read_module(&report.module_path)? else {
        return Err(CodegenError::Drift(format!(
            "{} is missing. Run {} to regenerate.",
            report.module_path.display(),
            crate::GENERATOR_NAME
        )));
    };
    if existing != source {
        return Err(CodegenError::Drift(format!(
            "{} is out of date. Run {} to regenerate.",
            report.module_path.display(),
            crate::GENERATOR_NAME
        )));
    }
    for entry in list_output_dir(&config.output_dir)? {
        if entry.file_name().is_none_or(|name| name != config.module_file.as_str()) {
            return Err(CodegenError::Drift(format!(
                "unexpected file {} in generated directory",
                entry.display()
            )));
        }
    }
    Ok(report)
}

/// Loads, reports, and renders without touching the output directory.
fn prepare<W: Write>(
    config: &GeneratorConfig,
    diagnostics: &mut W,
) -> Result<(GenerationReport, String), CodegenError> {
    config.validate()?;
    let catalog = Catalog::load(&config.catalog_path)?;
    config.verify_output_location()?;
    let version = catalog.version_label();
    report_line(diagnostics, &format!("version {version}"))?;
    report_line(diagnostics, &format!("loaded {} tests", catalog.len()))?;

    let duplicate_names = duplicate_display_names(&catalog, &config.name_prefix);
    for name in &duplicate_names {
        report_line(
            diagnostics,
            &format!("warning: display name `{name}` is derived from more than one test"),
        )?;
    }

    let source = render_module(&catalog, config)?;
    let report = GenerationReport {
        version,
        entries: catalog.len(),
        module_path: config.module_path(),
        duplicate_names,
    };
    Ok((report, source))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns display names shared by two or more keys, in first-seen order.
fn duplicate_display_names(catalog: &Catalog, prefix: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut duplicates = Vec::new();
    for entry in catalog.entries() {
        let name = display_name(&entry.key, prefix);
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

/// Writes a single diagnostic line.
fn report_line<W: Write>(diagnostics: &mut W, message: &str) -> Result<(), CodegenError> {
    writeln!(diagnostics, "{message}")
        .map_err(|err| CodegenError::Write(format!("diagnostics stream: {err}")))
}
