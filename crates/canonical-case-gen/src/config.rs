// crates/canonical-case-gen/src/config.rs
// ============================================================================
// Module: Generator Configuration
// Description: Input/output locations and generated-module naming.
// Purpose: Keep fixed paths and names out of the generation core.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! [`GeneratorConfig`] carries the catalog path, the output directory, and the
//! names the generated module refers to. Every field has a default, so running
//! without a config file reproduces the conventional `canonical.yaml` →
//! `canonical_cases/mod.rs` layout. A TOML file may override any subset of the
//! fields; unknown keys are rejected.

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CodegenError;

// ============================================================================
// CONSTANTS: Defaults and limits
// ============================================================================

/// Default catalog path relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "canonical.yaml";

/// Default output directory relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "canonical_cases";

/// Default generated module file name inside the output directory.
pub const DEFAULT_MODULE_FILE: &str = "mod.rs";

/// Default catalog key prefix stripped from display names.
pub const DEFAULT_NAME_PREFIX: &str = "test";

/// Maximum config file size accepted by the loader.
pub const MAX_CONFIG_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Generator configuration.
///
/// # Invariants
/// - After [`GeneratorConfig::validate`] succeeds, `module_file` is a plain file name and the
///   three Rust names are valid identifiers.
/// - `output_dir` has no `..` component.
/// - After [`GeneratorConfig::verify_output_location`] succeeds, the resolved `output_dir` is
///   neither the catalog's directory nor one of its ancestors.
///
/// # Examples
/// ```
/// use canonical_case_gen::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.module_path(), std::path::Path::new("canonical_cases/mod.rs"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path to the YAML test catalog.
    pub catalog_path: PathBuf,
    /// Directory owned by the generator; removed and recreated on every run.
    pub output_dir: PathBuf,
    /// File name of the generated module inside `output_dir`.
    pub module_file: String,
    /// Literal prefix removed from catalog keys to form display names.
    pub name_prefix: String,
    /// Runner function imported from the parent module.
    pub runner_fn: String,
    /// Test case type imported from the parent module.
    pub case_type: String,
    /// Name of the generated function every registration targets.
    pub entry_fn: String,
    /// Sort mapping keys when serializing test definitions.
    pub sort_keys: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            module_file: DEFAULT_MODULE_FILE.to_string(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            runner_fn: "runner".to_string(),
            case_type: "TestCase".to_string(),
            entry_fn: "canonical".to_string(),
            sort_keys: true,
        }
    }
}

impl GeneratorConfig {
    /// Loads a config file, falling back to defaults for omitted fields.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Config`] when the file cannot be read, exceeds
    /// [`MAX_CONFIG_BYTES`], is not UTF-8 TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        let bytes = fs::read(path).map_err(|err| {
            CodegenError::Config(format!("unable to read {}: {err}", path.display()))
        })?;
        if bytes.len() > MAX_CONFIG_BYTES {
            return Err(CodegenError::Config("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| CodegenError::Config("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| CodegenError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Config`] when a path or name is unusable.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(CodegenError::Config("catalog_path must be set".to_string()));
        }
        validate_output_dir(&self.output_dir)?;
        if self.catalog_path.starts_with(&self.output_dir) {
            return Err(CodegenError::Config(format!(
                "output_dir {} contains the catalog {}",
                self.output_dir.display(),
                self.catalog_path.display()
            )));
        }
        validate_module_file(&self.module_file)?;
        for (field, value) in [
            ("runner_fn", &self.runner_fn),
            ("case_type", &self.case_type),
            ("entry_fn", &self.entry_fn),
        ] {
            if !is_rust_identifier(value) {
                return Err(CodegenError::Config(format!(
                    "{field} must be a rust identifier, got `{value}`"
                )));
            }
        }
        Ok(())
    }

    /// Checks on disk that regenerating `output_dir` cannot delete the catalog.
    ///
    /// The catalog is canonicalized (it must exist). The output directory is
    /// resolved through its nearest existing ancestor, so symlinks and
    /// absolute spellings of the working directory compare equal.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Config`] when either path cannot be resolved or
    /// the output directory is the catalog's directory or above it.
    pub fn verify_output_location(&self) -> Result<(), CodegenError> {
        let catalog = fs::canonicalize(&self.catalog_path).map_err(|err| {
            CodegenError::Config(format!(
                "unable to resolve catalog {}: {err}",
                self.catalog_path.display()
            ))
        })?;
        let output = resolve_output_dir(&self.output_dir)?;
        let catalog_dir = catalog.parent().unwrap_or(&catalog);
        if catalog.starts_with(&output) || catalog_dir.starts_with(&output) {
            return Err(CodegenError::Config(format!(
                "output_dir {} would remove the catalog {}",
                self.output_dir.display(),
                self.catalog_path.display()
            )));
        }
        Ok(())
    }

    /// Returns the full path of the generated module.
    #[must_use]
    pub fn module_path(&self) -> PathBuf {
        self.output_dir.join(&self.module_file)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects output directories the generator must never delete.
fn validate_output_dir(dir: &Path) -> Result<(), CodegenError> {
    if dir.components().any(|component| component == Component::ParentDir) {
        return Err(CodegenError::Config(format!(
            "output_dir {} must not contain `..`",
            dir.display()
        )));
    }
    let mut components = dir.components();
    match (components.next(), components.next()) {
        (None, _) => Err(CodegenError::Config("output_dir must be set".to_string())),
        (Some(Component::CurDir | Component::RootDir), None) => Err(CodegenError::Config(
            format!("output_dir {} is not a dedicated directory", dir.display()),
        )),
        _ => Ok(()),
    }
}

/// Resolves `dir` to an absolute path through its nearest existing ancestor.
fn resolve_output_dir(dir: &Path) -> Result<PathBuf, CodegenError> {
    let absolute = std::path::absolute(dir).map_err(|err| {
        CodegenError::Config(format!("unable to resolve output_dir {}: {err}", dir.display()))
    })?;
    for ancestor in absolute.ancestors() {
        if let (Ok(resolved), Ok(rest)) =
            (fs::canonicalize(ancestor), absolute.strip_prefix(ancestor))
        {
            return Ok(resolved.join(rest));
        }
    }
    Err(CodegenError::Config(format!(
        "output_dir {} has no existing ancestor",
        dir.display()
    )))
}

/// Ensures the module file is a bare file name.
fn validate_module_file(name: &str) -> Result<(), CodegenError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(CodegenError::Config(format!("module_file must be a file name, got `{name}`"))),
    }
}

/// Returns true for ASCII Rust identifiers (keywords are not screened).
fn is_rust_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        && value != "_"
}
