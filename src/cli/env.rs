//! Env file CLI commands
//!
//! Implements `encrypt`, `add`, `reveal` and `status`.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::{EnvcryptPaths, Settings};
use crate::crypto::load_key;
use crate::envfile::{is_encrypted, parser::is_valid_name, EnvMap};
use crate::error::{EnvcryptError, EnvcryptResult};
use crate::services::{MergeOutcome, SelectiveEncryptor};
use crate::storage::{read_env_file, write_env_file};

/// Arguments for `envcrypt encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Path to the key file (a leading ~ is expanded)
    pub key_file: String,
    /// Path to the env file
    pub env_file: PathBuf,
    /// Comma-separated names whose values should be encrypted
    #[arg(short, long, alias = "key")]
    pub keys: Option<String>,
}

/// Arguments for `envcrypt add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Path to the key file (a leading ~ is expanded)
    pub key_file: String,
    /// Path to the env file
    pub env_file: PathBuf,
    /// Comma-separated NAME=VALUE pairs to add or update, stored encrypted
    #[arg(short, long)]
    pub env: Option<String>,
}

/// Arguments for `envcrypt reveal`
#[derive(Args, Debug)]
pub struct RevealArgs {
    /// Path to the key file (a leading ~ is expanded)
    pub key_file: String,
    /// Path to the env file
    pub env_file: PathBuf,
    /// Comma-separated names to decrypt
    #[arg(short, long, alias = "key")]
    pub keys: String,
}

/// Arguments for `envcrypt status`
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to the env file
    pub env_file: PathBuf,
}

/// Encrypt existing values by name
///
/// Returns `false` when no names were given and nothing was written.
pub fn handle_encrypt_command(
    paths: &EnvcryptPaths,
    settings: &Settings,
    args: EncryptArgs,
) -> EnvcryptResult<bool> {
    let key = load_key(&args.key_file)?;
    let existing = read_env_file(&args.env_file)?;
    let names = parse_key_list(args.keys.as_deref().unwrap_or_default());

    let outcome = SelectiveEncryptor::aes_gcm().encrypt_subset(&existing, &names, &key)?;
    let written = commit(paths, settings, Operation::Encrypt, &args.env_file, outcome)?;

    if written {
        println!("Environment variables encrypted successfully");
    } else {
        eprintln!("Failed to encrypt environment variables: no keys given");
    }
    Ok(written)
}

/// Add or update values, always storing them encrypted
///
/// Returns `false` when no pairs were given and nothing was written.
pub fn handle_add_command(
    paths: &EnvcryptPaths,
    settings: &Settings,
    args: AddArgs,
) -> EnvcryptResult<bool> {
    let updates = parse_assignments(args.env.as_deref().unwrap_or_default())?;
    let key = load_key(&args.key_file)?;
    let existing = read_env_file(&args.env_file)?;

    let outcome = SelectiveEncryptor::aes_gcm().add_or_update(&existing, &updates, &key)?;
    let written = commit(paths, settings, Operation::Add, &args.env_file, outcome)?;

    if written {
        println!("Environment variables encrypted successfully");
    } else {
        eprintln!("Failed to encrypt environment variables: no NAME=VALUE pairs given");
    }
    Ok(written)
}

/// Print decrypted values for the named entries
pub fn handle_reveal_command(args: RevealArgs) -> EnvcryptResult<()> {
    let key = load_key(&args.key_file)?;
    let existing = read_env_file(&args.env_file)?;
    let names = parse_key_list(&args.keys);

    for (name, plaintext) in SelectiveEncryptor::aes_gcm().reveal(&existing, &names, &key)? {
        println!("{}={}", name, plaintext.as_str());
    }

    Ok(())
}

/// List every entry with its encryption state
pub fn handle_status_command(args: StatusArgs) -> EnvcryptResult<()> {
    let existing = read_env_file(&args.env_file)?;

    if existing.is_empty() {
        println!("No variables found in {}", args.env_file.display());
        return Ok(());
    }

    let width = existing.names().map(str::len).max().unwrap_or(0);
    for (name, value) in existing.iter() {
        let state = if is_encrypted(value) { "encrypted" } else { "plain" };
        println!("{:<width$}  {}", name, state, width = width);
    }

    Ok(())
}

/// Split a comma-separated list of names, dropping blanks
pub fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse comma-separated `NAME=VALUE` pairs
///
/// Each pair is split on its first `=`, so values may contain `=` but not `,`.
pub fn parse_assignments(raw: &str) -> EnvcryptResult<EnvMap> {
    let mut updates = EnvMap::new();

    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (name, value) = item.split_once('=').ok_or_else(|| {
            EnvcryptError::Validation(format!("Expected NAME=VALUE, got '{}'", item))
        })?;

        let name = name.trim();
        if !is_valid_name(name) {
            return Err(EnvcryptError::Validation(format!(
                "Invalid variable name: '{}'",
                name
            )));
        }

        updates.insert(name, value);
    }

    Ok(updates)
}

/// Write a merged mapping back and record it in the audit log
fn commit(
    paths: &EnvcryptPaths,
    settings: &Settings,
    operation: Operation,
    env_file: &Path,
    outcome: MergeOutcome,
) -> EnvcryptResult<bool> {
    let MergeOutcome::Merged {
        map,
        changed,
        encrypted,
    } = outcome
    else {
        return Ok(false);
    };

    write_env_file(env_file, &map)?;

    if settings.audit_enabled {
        let logger = AuditLogger::new(paths.audit_log());
        if let Err(e) = logger.log(&AuditEntry::new(operation, env_file, changed, encrypted)) {
            eprintln!("Warning: failed to record audit entry: {}", e);
        }
    }

    Ok(true)
}
