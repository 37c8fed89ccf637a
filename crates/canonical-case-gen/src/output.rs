// crates/canonical-case-gen/src/output.rs
// ============================================================================
// Module: Output Directory
// Description: Full-replace regeneration of the generated module directory.
// Purpose: Clear the owned directory and write the module without torn files.
// Dependencies: std::fs
// ============================================================================

//! ## Overview
//! The generator owns its output directory exclusively. Each run removes it,
//! recreates it empty, and writes the module through a temporary sibling file
//! that is synced and then renamed into place, so readers observe either the
//! complete module or no module at all.

use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::CodegenError;

// ============================================================================
// SECTION: Directory Regeneration
// ============================================================================

/// Removes `dir` recursively and recreates it empty.
///
/// A missing directory is not an error. Any other removal failure, including a
/// regular file sitting at `dir`, is fatal.
///
/// # Errors
///
/// Returns [`CodegenError::Filesystem`] when removal or creation fails.
pub fn reset_output_dir(dir: &Path) -> Result<(), CodegenError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(CodegenError::Filesystem(format!(
                "unable to remove {}: {err}",
                dir.display()
            )));
        }
    }
    fs::create_dir_all(dir).map_err(|err| {
        CodegenError::Filesystem(format!("unable to create {}: {err}", dir.display()))
    })
}

/// Lists the entries of `dir` in sorted order.
///
/// # Errors
///
/// Returns [`CodegenError::Filesystem`] when the directory cannot be read.
pub fn list_output_dir(dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
    let listing_error = |err: std::io::Error| {
        CodegenError::Filesystem(format!("unable to list {}: {err}", dir.display()))
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_error)? {
        entries.push(entry.map_err(listing_error)?.path());
    }
    entries.sort();
    Ok(entries)
}

// ============================================================================
// SECTION: Module Writes
// ============================================================================

/// Writes the generated contents to `path` via a `.partial` sibling and rename.
///
/// The sibling is created exclusively, so a leftover from an interrupted run
/// fails the write instead of being clobbered.
///
/// # Errors
///
/// Returns [`CodegenError::Write`] when any step fails; a sibling this call
/// created is removed on a best-effort basis.
pub fn write_module(path: &Path, contents: &str) -> Result<(), CodegenError> {
    let (temp_path, mut file) = create_partial(path)?;
    if let Err(err) = file.write_all(contents.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(path, &err));
    }
    if let Err(err) = file.sync_all() {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(path, &err));
    }
    drop(file);
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(path, &err));
    }
    Ok(())
}

/// Reads a previously generated module, returning `None` when it is absent.
///
/// # Errors
///
/// Returns [`CodegenError::Read`] for failures other than a missing file.
pub fn read_module(path: &Path) -> Result<Option<String>, CodegenError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(CodegenError::Read(format!("{}: {err}", path.display()))),
    }
}

/// Creates the exclusive `.<name>.partial` sibling of the destination.
fn create_partial(path: &Path) -> Result<(PathBuf, fs::File), CodegenError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().and_then(|name| name.to_str()).ok_or_else(|| {
        CodegenError::Write("output path does not include a file name".to_string())
    })?;
    let temp_path = parent.join(format!(".{file_name}.partial"));
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|err| write_error(&temp_path, &err))?;
    Ok((temp_path, file))
}

/// Formats an IO failure against the destination path.
fn write_error(path: &Path, err: &std::io::Error) -> CodegenError {
    CodegenError::Write(format!("{}: {err}", path.display()))
}
