//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.
//! There is no locking: two processes rewriting the same file race and the
//! last rename wins.

use std::ffi::OsString;
use std::fs::{self, OpenOptions, Permissions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::crypto::KeyHandle;
use crate::envfile::{self, EnvMap};
use crate::error::EnvcryptError;

/// Read and parse an env file, failing if it doesn't exist
pub fn read_env_file<P: AsRef<Path>>(path: P) -> Result<EnvMap, EnvcryptError> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(EnvcryptError::env_file_not_found(path));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EnvcryptError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    envfile::parse(&contents)
}

/// Render and write an env file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left untouched. A symlinked
/// target is resolved so the link survives, and an existing file keeps its
/// permissions. Mappings whose rendered text would parse back differently
/// are rejected before anything touches the disk.
pub fn write_env_file<P: AsRef<Path>>(path: P, map: &EnvMap) -> Result<(), EnvcryptError> {
    let text = envfile::render(map);
    ensure_round_trip(&text, map)?;

    let target = resolve_target(path.as_ref())?;
    let temp_path = temp_path_for(&target)?;
    let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let result = write_temp(&temp_path, text.as_bytes(), permissions).and_then(|()| {
        fs::rename(&temp_path, &target)
            .map_err(|e| EnvcryptError::Io(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Reject values the verbatim renderer cannot reproduce
fn ensure_round_trip(text: &str, map: &EnvMap) -> Result<(), EnvcryptError> {
    const MISMATCH: &str = "Rendered env file does not parse back to the same entries";

    let reparsed = envfile::parse(text)
        .map_err(|e| EnvcryptError::Validation(format!("{}: {}", MISMATCH, e)))?;
    if reparsed == *map {
        return Ok(());
    }

    let culprit = map
        .iter()
        .find(|(name, value)| reparsed.get(name) != Some(*value))
        .map(|(name, _)| name);

    Err(EnvcryptError::Validation(match culprit {
        Some(name) => format!(
            "Value of {} cannot be written back unquoted without changing it",
            name
        ),
        None => MISMATCH.to_string(),
    }))
}

fn resolve_target(path: &Path) -> Result<PathBuf, EnvcryptError> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    fs::canonicalize(path).map_err(|e| {
        EnvcryptError::Io(format!("Failed to resolve {}: {}", path.display(), e))
    })
}

fn write_temp(
    temp_path: &Path,
    contents: &[u8],
    permissions: Option<Permissions>,
) -> Result<(), EnvcryptError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options
        .open(temp_path)
        .map_err(|e| EnvcryptError::Io(format!("Failed to create temp file: {}", e)))?;

    if let Some(permissions) = permissions {
        file.set_permissions(permissions)
            .map_err(|e| EnvcryptError::Io(format!("Failed to copy permissions: {}", e)))?;
    }

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| EnvcryptError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| EnvcryptError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| EnvcryptError::Io(format!("Failed to sync data: {}", e)))
}

/// Write a key to disk in its ASCII-safe form
///
/// Refuses to replace an existing file unless `overwrite` is set. On Unix the
/// file is created readable by the owner only.
pub fn write_key_file<P: AsRef<Path>>(
    path: P,
    key: &KeyHandle,
    overwrite: bool,
) -> Result<(), EnvcryptError> {
    let path = path.as_ref();

    if path.exists() && !overwrite {
        return Err(EnvcryptError::Validation(format!(
            "Key file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            EnvcryptError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| {
        EnvcryptError::Io(format!("Failed to create key file {}: {}", path.display(), e))
    })?;

    file.write_all(key.to_ascii_safe().as_bytes())
        .map_err(|e| EnvcryptError::Io(format!("Failed to write key file: {}", e)))?;

    Ok(())
}

/// Sibling temp path, so the final rename stays on one filesystem
fn temp_path_for(path: &Path) -> Result<PathBuf, EnvcryptError> {
    let file_name = path.file_name().ok_or_else(|| {
        EnvcryptError::Validation(format!("Not a file path: {}", path.display()))
    })?;

    let mut temp_name = OsString::from(file_name);
    temp_name.push(".envcrypt.tmp");
    Ok(path.with_file_name(temp_name))
}
