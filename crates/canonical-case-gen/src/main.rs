// crates/canonical-case-gen/src/main.rs
// ============================================================================
// Module: Canonical Case Generator CLI
// Description: CLI entrypoint for regenerating the canonical test module.
// Purpose: Run generate (default) or check against the catalog on disk.
// Dependencies: clap, canonical-case-gen
// ============================================================================

//! ## Overview
//! Running `canonical-case-gen` with no arguments reads `canonical.yaml` from
//! the working directory and regenerates `canonical_cases/mod.rs`. The `check`
//! subcommand verifies the on-disk module instead, for use in CI.
//! Diagnostics go to stderr; any failure exits non-zero.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use canonical_case_gen::CodegenError;
use canonical_case_gen::GeneratorConfig;
use canonical_case_gen::check;
use canonical_case_gen::generate;
use clap::Parser;
use clap::Subcommand;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// CLI arguments for module generation.
#[derive(Debug, Parser)]
#[command(
    name = "canonical-case-gen",
    about = "Generate test_case registrations from canonical.yaml."
)]
struct Cli {
    /// Optional TOML config file.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Catalog path, overriding the config file.
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,
    /// Output directory, overriding the config file.
    #[arg(long, value_name = "DIR", global = true)]
    out_dir: Option<PathBuf>,
    /// Subcommand to execute; defaults to `generate`.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Supported CLI subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Regenerate the output directory.
    Generate,
    /// Verify the output directory matches the catalog.
    Check,
}

// ============================================================================
// SECTION: Command Dispatch
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Dispatches the CLI command.
fn run() -> Result<(), CodegenError> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mut stderr = std::io::stderr();
    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => generate(&config, &mut stderr)?,
        Command::Check => check(&config, &mut stderr)?,
    };
    Ok(())
}

/// Builds the effective config from the optional file and CLI overrides.
fn resolve_config(cli: &Cli) -> Result<GeneratorConfig, CodegenError> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(catalog) = &cli.catalog {
        config.catalog_path.clone_from(catalog);
    }
    if let Some(out_dir) = &cli.out_dir {
        config.output_dir.clone_from(out_dir);
    }
    config.validate()?;
    Ok(config)
}

/// Reports a CLI error to stderr.
fn report_error(err: &CodegenError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{err}");
    ExitCode::FAILURE
}
