// crates/canonical-case-gen/src/catalog.rs
// ============================================================================
// Module: Test Catalog
// Description: Loading and shape validation for `canonical.yaml`.
// Purpose: Turn the catalog document into ordered, opaque test entries.
// Dependencies: serde_yaml
// ============================================================================

//! ## Overview
//! The catalog is a YAML mapping with a `version` tag and a `tests` mapping
//! from test name to test definition. Definitions are kept as generic
//! [`serde_yaml::Value`] trees: the generator re-serializes them and never
//! looks inside.
//!
//! Parsing and shape checks are split on purpose so the error kind tells the
//! caller which layer failed: malformed YAML or a non-mapping root is
//! [`CodegenError::Parse`], a missing or mistyped `version`/`tests` is
//! [`CodegenError::Schema`]. Duplicate keys are rejected by the YAML parser.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_yaml::Value;

use crate::CodegenError;

// ============================================================================
// CONSTANTS: Catalog input limits
// ============================================================================

/// Maximum catalog size accepted by the loader.
pub const MAX_CATALOG_BYTES: u64 = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Catalog Model
// ============================================================================

/// One named test definition from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct TestEntry {
    /// Catalog key, unique within the catalog.
    pub key: String,
    /// Opaque structured definition consumed by the external runner.
    pub definition: Value,
}

/// Parsed test catalog.
///
/// # Invariants
/// - `entries` follow the insertion order of the `tests` mapping.
/// - Entry keys are unique.
/// - `version` is a string, number, or bool scalar.
///
/// # Examples
/// ```
/// use canonical_case_gen::Catalog;
///
/// # fn main() -> Result<(), canonical_case_gen::CodegenError> {
/// let catalog = Catalog::parse("version: 7\ntests:\n  test_a: 1\n  b: [x]\n")?;
/// assert_eq!(catalog.version_label(), "7");
/// let keys: Vec<&str> = catalog.entries().iter().map(|entry| entry.key.as_str()).collect();
/// assert_eq!(keys, ["test_a", "b"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Version tag as written in the catalog.
    version: Value,
    /// Test entries in catalog order.
    entries: Vec<TestEntry>,
}

impl Catalog {
    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Read`] when the file cannot be opened or read,
    /// [`CodegenError::Parse`] when it exceeds [`MAX_CATALOG_BYTES`], is not
    /// UTF-8, or is not a YAML mapping, and [`CodegenError::Schema`] when the
    /// mapping lacks the catalog shape.
    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        let bytes = read_catalog_bytes(path)?;
        let text = String::from_utf8(bytes).map_err(|_| {
            CodegenError::Parse(format!("{} is not valid utf-8", path.display()))
        })?;
        Self::parse(&text)
    }

    /// Parses catalog text.
    ///
    /// YAML merge keys (`<<`) are resolved before the shape checks, so entry
    /// definitions never carry them.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Parse`] for invalid YAML or a non-mapping root
    /// and [`CodegenError::Schema`] for a missing or mistyped `version` or
    /// `tests` field.
    pub fn parse(text: &str) -> Result<Self, CodegenError> {
        let mut root: Value =
            serde_yaml::from_str(text).map_err(|err| CodegenError::Parse(err.to_string()))?;
        root.apply_merge().map_err(|err| CodegenError::Parse(err.to_string()))?;
        let Value::Mapping(root) = root else {
            return Err(CodegenError::Parse("catalog root must be a mapping".to_string()));
        };

        let version = match root.get("version") {
            None => return Err(CodegenError::Schema("missing `version`".to_string())),
            Some(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => value.clone(),
            Some(_) => {
                return Err(CodegenError::Schema(
                    "`version` must be a string or number".to_string(),
                ));
            }
        };

        let tests = match root.get("tests") {
            None => return Err(CodegenError::Schema("missing `tests`".to_string())),
            Some(Value::Mapping(tests)) => tests,
            Some(_) => return Err(CodegenError::Schema("`tests` must be a mapping".to_string())),
        };

        let mut entries = Vec::with_capacity(tests.len());
        for (key, definition) in tests {
            let Value::String(key) = key else {
                return Err(CodegenError::Schema(format!(
                    "test names must be strings, got `{}`",
                    inline_yaml(key)
                )));
            };
            entries.push(TestEntry {
                key: key.clone(),
                definition: definition.clone(),
            });
        }

        Ok(Self {
            version,
            entries,
        })
    }

    /// Returns the version tag rendered for diagnostics.
    #[must_use]
    pub fn version_label(&self) -> String {
        match &self.version {
            Value::String(value) => value.clone(),
            Value::Number(value) => value.to_string(),
            Value::Bool(value) => value.to_string(),
            other => inline_yaml(other),
        }
    }

    /// Returns the test entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[TestEntry] {
        &self.entries
    }

    /// Returns the number of test entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog declares no tests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Display Names
// ============================================================================

/// Derives the display name of a catalog key.
///
/// The prefix match is literal and positional: `testing` with prefix `test`
/// becomes `ing`. Keys without the prefix are returned unchanged.
///
/// # Examples
/// ```
/// use canonical_case_gen::display_name;
///
/// assert_eq!(display_name("test_foo", "test"), "_foo");
/// assert_eq!(display_name("testing", "test"), "ing");
/// assert_eq!(display_name("foo", "test"), "foo");
/// ```
#[must_use]
pub fn display_name<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

// ============================================================================
// SECTION: Catalog Input
// ============================================================================

/// Reads the catalog with size limits to avoid memory exhaustion.
fn read_catalog_bytes(path: &Path) -> Result<Vec<u8>, CodegenError> {
    let read_error = |err: std::io::Error| CodegenError::Read(format!("{}: {err}", path.display()));
    let file = fs::File::open(path).map_err(read_error)?;
    let metadata = file.metadata().map_err(read_error)?;
    if metadata.len() > MAX_CATALOG_BYTES {
        return Err(CodegenError::Parse(format!("catalog exceeds {MAX_CATALOG_BYTES} bytes")));
    }
    let mut bytes = Vec::new();
    let mut limited = file.take(MAX_CATALOG_BYTES + 1);
    limited.read_to_end(&mut bytes).map_err(read_error)?;
    let size = u64::try_from(bytes.len()).map_err(|_| {
        CodegenError::Parse("catalog size exceeds addressable memory".to_string())
    })?;
    if size > MAX_CATALOG_BYTES {
        return Err(CodegenError::Parse(format!("catalog exceeds {MAX_CATALOG_BYTES} bytes")));
    }
    Ok(bytes)
}

/// Renders a value on one line for error messages.
fn inline_yaml(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|text| text.trim_end().replace('\n', " "))
        .unwrap_or_else(|_| "<unprintable>".to_string())
}

#[cfg(test)]
mod tests;
