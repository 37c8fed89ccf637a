// crates/canonical-case-gen/src/catalog/tests.rs
// ============================================================================
// Module: Test Catalog Unit Tests
// Description: Parse/shape error split, ordering, and display names.
// Purpose: Pin down which malformed catalogs fail and with which error kind.
// Dependencies: canonical-case-gen, serde_yaml, tempfile
// ============================================================================

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    clippy::use_debug,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use serde_yaml::Value;

use super::Catalog;
use super::MAX_CATALOG_BYTES;
use super::display_name;
use crate::CodegenError;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn keys(catalog: &Catalog) -> Vec<&str> {
    catalog.entries().iter().map(|entry| entry.key.as_str()).collect()
}

fn expect_parse_error(text: &str) {
    match Catalog::parse(text) {
        Err(CodegenError::Parse(_)) => {}
        other => panic!("expected parse error for {text:?}, got {other:?}"),
    }
}

fn expect_schema_error(text: &str) {
    match Catalog::parse(text) {
        Err(CodegenError::Schema(_)) => {}
        other => panic!("expected schema error for {text:?}, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn parses_version_and_entries_in_order() {
    let catalog = Catalog::parse(
        "version: 3\ntests:\n  test_basic: {a: 1, b: [true, false]}\n  other: \"hello\"\n",
    )
    .expect("parse");
    assert_eq!(catalog.version_label(), "3");
    assert_eq!(catalog.len(), 2);
    assert_eq!(keys(&catalog), ["test_basic", "other"]);
    assert_eq!(catalog.entries()[1].definition, Value::String("hello".to_string()));
}

#[test]
fn insertion_order_is_not_sorted() {
    let catalog = Catalog::parse("version: x\ntests:\n  c: 1\n  a: 2\n  b: 3\n").expect("parse");
    assert_eq!(keys(&catalog), ["c", "a", "b"]);
}

#[test]
fn version_label_keeps_string_form() {
    let catalog = Catalog::parse("version: '7'\ntests: {}\n").expect("parse");
    assert_eq!(catalog.version_label(), "7");
    let catalog = Catalog::parse("version: 1.5\ntests: {}\n").expect("parse");
    assert_eq!(catalog.version_label(), "1.5");
    let catalog = Catalog::parse("version: v2-beta\ntests: {}\n").expect("parse");
    assert_eq!(catalog.version_label(), "v2-beta");
}

#[test]
fn empty_tests_mapping_is_valid() {
    let catalog = Catalog::parse("version: 1\ntests: {}\n").expect("parse");
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
}

#[test]
fn invalid_yaml_is_a_parse_error() {
    expect_parse_error("version: 1\ntests: {unclosed\n");
    expect_parse_error("version: 1\ntests: [a, b\n");
}

#[test]
fn non_mapping_root_is_a_parse_error() {
    expect_parse_error("- version\n- tests\n");
    expect_parse_error("just a string\n");
}

#[test]
fn duplicate_test_names_are_rejected() {
    expect_parse_error("version: 1\ntests:\n  same: 1\n  same: 2\n");
}

#[test]
fn missing_or_mistyped_tests_is_a_schema_error() {
    expect_schema_error("version: 1\n");
    expect_schema_error("version: 1\ntests: [a, b]\n");
    expect_schema_error("version: 1\ntests: null\n");
}

#[test]
fn missing_or_mistyped_version_is_a_schema_error() {
    expect_schema_error("tests: {}\n");
    expect_schema_error("version: [1, 2]\ntests: {}\n");
    expect_schema_error("version: ~\ntests: {}\n");
}

#[test]
fn non_string_test_names_are_a_schema_error() {
    expect_schema_error("version: 1\ntests:\n  42: {}\n");
}

#[test]
fn definitions_are_kept_opaque() {
    let catalog = Catalog::parse(
        "version: 1\ntests:\n  deep:\n    source: \"x\"\n    result: {steps: [[{type: text}]], metadata: {}}\n",
    )
    .expect("parse");
    let Value::Mapping(definition) = &catalog.entries()[0].definition else {
        panic!("definition should stay a mapping");
    };
    assert!(definition.contains_key("result"));
    assert!(definition.contains_key("source"));
}

#[test]
fn display_name_strips_literal_prefix() {
    assert_eq!(display_name("test_foo", "test"), "_foo");
    assert_eq!(display_name("testBasicDirection", "test"), "BasicDirection");
    assert_eq!(display_name("testing", "test"), "ing");
    assert_eq!(display_name("foo", "test"), "foo");
    assert_eq!(display_name("Test_foo", "test"), "Test_foo");
    assert_eq!(display_name("test", "test"), "");
    assert_eq!(display_name("test_foo", ""), "test_foo");
}

#[test]
fn load_reports_missing_file_as_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = Catalog::load(&dir.path().join("canonical.yaml"));
    assert!(matches!(result, Err(CodegenError::Read(_))));
}

#[test]
fn load_rejects_non_utf8_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("canonical.yaml");
    fs::write(&path, [0xff, 0xfe, 0x00, b'v']).expect("write");
    assert!(matches!(Catalog::load(&path), Err(CodegenError::Parse(_))));
}

#[test]
fn load_enforces_size_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("canonical.yaml");
    let size = usize::try_from(MAX_CATALOG_BYTES + 1).expect("size");
    fs::write(&path, vec![b'#'; size]).expect("write");
    assert!(matches!(Catalog::load(&path), Err(CodegenError::Parse(_))));
}

#[test]
fn merge_keys_are_resolved_into_definitions() {
    let catalog = Catalog::parse(
        "version: 1\ntests:\n  a: &base {x: 1}\n  b: {<<: *base, y: 2}\n  c: {<<: [*base], x: 3}\n",
    )
    .expect("parse");
    let merged: Value = serde_yaml::from_str("{x: 1, y: 2}").expect("yaml");
    let overridden: Value = serde_yaml::from_str("{x: 3}").expect("yaml");
    assert_eq!(catalog.entries()[1].definition, merged);
    assert_eq!(catalog.entries()[2].definition, overridden);
}

#[test]
fn malformed_merge_key_is_a_parse_error() {
    expect_parse_error("version: 1\ntests:\n  a: {<<: 5}\n");
}
