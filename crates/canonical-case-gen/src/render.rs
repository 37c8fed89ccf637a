// crates/canonical-case-gen/src/render.rs
// ============================================================================
// Module: Module Rendering
// Description: Canonical YAML serialization and `test_case` module rendering.
// Purpose: Produce the generated Rust source for a catalog, fully in memory.
// Dependencies: serde_yaml
// ============================================================================

//! ## Overview
//! Rendering is a pure function of the catalog and the config: a fixed header,
//! one `#[test_case]` attribute per entry in catalog order, and a footer that
//! re-parses each embedded block into the runner's case type.
//!
//! ### Design Notes
//! - Definitions are embedded in raw string literals. The hash count grows
//!   when the payload itself contains a `"#…` sequence, up to the 255 rustc
//!   allows; longer runs fail the render.
//! - Display names are escaped into ordinary string literals.
//! - With `sort_keys`, mapping keys are ordered recursively so the output does
//!   not depend on how the catalog was edited. Sequences keep their order.

use std::cmp::Ordering;
use std::fmt::Write;

use serde_yaml::Mapping;
use serde_yaml::Value;
use serde_yaml::value::TaggedValue;

use crate::Catalog;
use crate::CodegenError;
use crate::GeneratorConfig;
use crate::display_name;

/// Generator name written into the header of every generated module.
pub const GENERATOR_NAME: &str = "canonical-case-gen";

/// Largest `#` count rustc accepts on a raw string literal.
const MAX_RAW_STRING_HASHES: usize = 255;

// ============================================================================
// SECTION: Module Rendering
// ============================================================================

/// Renders the full generated module for a catalog.
///
/// # Errors
///
/// Returns [`CodegenError::Write`] if a test definition cannot be serialized
/// or cannot be embedded in a raw string literal.
///
/// # Examples
/// ```
/// use canonical_case_gen::Catalog;
/// use canonical_case_gen::GeneratorConfig;
/// use canonical_case_gen::render_module;
///
/// # fn main() -> Result<(), canonical_case_gen::CodegenError> {
/// let catalog = Catalog::parse("version: 1\ntests:\n  testOne: {a: 1}\n")?;
/// let source = render_module(&catalog, &GeneratorConfig::default())?;
/// assert!(source.contains("; \"One\")]"));
/// # Ok(())
/// # }
/// ```
pub fn render_module(catalog: &Catalog, config: &GeneratorConfig) -> Result<String, CodegenError> {
    let mut out = String::new();
    render_header(&mut out, config);
    for entry in catalog.entries() {
        let yaml = canonical_yaml(&entry.definition, config.sort_keys).map_err(|err| {
            CodegenError::Write(format!("unable to serialize `{}`: {err}", entry.key))
        })?;
        let hashes = raw_string_hashes(&yaml).ok_or_else(|| {
            CodegenError::Write(format!(
                "`{}` needs more than {MAX_RAW_STRING_HASHES} raw string hashes",
                entry.key
            ))
        })?;
        render_entry(&mut out, display_name(&entry.key, &config.name_prefix), &yaml, hashes);
    }
    render_footer(&mut out, config);
    Ok(out)
}

/// Writes the module header: provenance line and shared imports.
fn render_header(out: &mut String, config: &GeneratorConfig) {
    let source = config.catalog_path.file_name().map_or_else(
        || config.catalog_path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    let _ =
        writeln!(out, "//! AUTO GENERATED WITH `{GENERATOR_NAME}` from `{source}`. DO NOT EDIT.");
    let _ = writeln!(out, "use super::{{{}, {}}};", config.runner_fn, config.case_type);
    out.push_str("use test_case::test_case;\n\n");
}

/// Writes one `#[test_case]` registration.
fn render_entry(out: &mut String, name: &str, yaml: &str, hashes: usize) {
    let hashes = "#".repeat(hashes);
    let _ = writeln!(
        out,
        "#[test_case(r{hashes}\"\n{yaml}\"{hashes}; {})]",
        rust_string_literal(name)
    );
}

/// Writes the shared entry function every registration calls.
fn render_footer(out: &mut String, config: &GeneratorConfig) {
    let _ = writeln!(out, "fn {}(input: &str) {{", config.entry_fn);
    let _ = writeln!(
        out,
        "    let test_case: {} = serde_yaml::from_str(input).expect(\"Bad YAML input\");",
        config.case_type
    );
    let _ = writeln!(out, "    {}(test_case);", config.runner_fn);
    out.push_str("}\n");
}

// ============================================================================
// SECTION: Canonical Serialization
// ============================================================================

/// Serializes a test definition into its canonical YAML text.
///
/// The output always ends with a newline and keeps non-ASCII text unescaped.
/// Parsing it back yields a value equal to `value`.
///
/// # Errors
///
/// Returns the underlying [`serde_yaml::Error`] when serialization fails.
pub fn canonical_yaml(value: &Value, sort_keys: bool) -> Result<String, serde_yaml::Error> {
    if sort_keys {
        serde_yaml::to_string(&sorted_value(value))
    } else {
        serde_yaml::to_string(value)
    }
}

/// Returns a value with mapping keys sorted at every depth.
fn sorted_value(value: &Value) -> Value {
    match value {
        Value::Sequence(items) => Value::Sequence(items.iter().map(sorted_value).collect()),
        Value::Mapping(map) => {
            let mut pairs: Vec<(&Value, &Value)> = map.iter().collect();
            pairs.sort_by(|(left, _), (right, _)| key_order(left, right));
            let mut sorted = Mapping::with_capacity(pairs.len());
            for (key, value) in pairs {
                sorted.insert(key.clone(), sorted_value(value));
            }
            Value::Mapping(sorted)
        }
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: sorted_value(&tagged.value),
        })),
        _ => value.clone(),
    }
}

/// Total order over mapping keys: by kind first, then by content.
fn key_order(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::String(left), Value::String(right)) => left.cmp(right),
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        (Value::Number(left), Value::Number(right)) => {
            let numeric = match (left.as_f64(), right.as_f64()) {
                (Some(l), Some(r)) => l.total_cmp(&r),
                _ => Ordering::Equal,
            };
            numeric.then_with(|| key_text(left).cmp(&key_text(right)))
        }
        _ => key_rank(left)
            .cmp(&key_rank(right))
            .then_with(|| key_text(left).cmp(&key_text(right))),
    }
}

/// Ranks value kinds for key ordering.
const fn key_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Sequence(_) => 4,
        Value::Mapping(_) => 5,
        Value::Tagged(_) => 6,
    }
}

/// Text form of a key, used to break ties between non-string keys.
fn key_text<T: serde::Serialize>(value: &T) -> String {
    serde_yaml::to_string(value).unwrap_or_default()
}

// ============================================================================
// SECTION: Rust Literals
// ============================================================================

/// Returns the number of `#` needed so `"` + hashes never occurs in `text`.
///
/// `None` when that exceeds [`MAX_RAW_STRING_HASHES`].
fn raw_string_hashes(text: &str) -> Option<usize> {
    let mut longest = 0;
    let mut rest = text;
    while let Some(index) = rest.find('"') {
        rest = &rest[index + 1 ..];
        let run = rest.chars().take_while(|ch| *ch == '#').count();
        longest = longest.max(run);
    }
    (longest < MAX_RAW_STRING_HASHES).then_some(longest + 1)
}

/// Renders text as an escaped Rust string literal.
fn rust_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(literal, "\\u{{{:x}}}", u32::from(ch));
            }
            ch => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}
