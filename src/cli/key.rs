//! Key management CLI commands

use clap::Args;

use crate::config::{expand_tilde, EnvcryptPaths, Settings};
use crate::crypto::KeyHandle;
use crate::error::EnvcryptResult;
use crate::storage::write_key_file;

/// Arguments for `envcrypt keygen`
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Where to write the key (defaults to the configured key file)
    pub path: Option<String>,
    /// Overwrite an existing key file
    #[arg(short, long)]
    pub force: bool,
}

/// Generate a new random key and write it to disk
pub fn handle_keygen_command(
    paths: &EnvcryptPaths,
    settings: &Settings,
    args: KeygenArgs,
) -> EnvcryptResult<()> {
    let target = match args.path.as_deref() {
        Some(path) => expand_tilde(path),
        None => settings.key_file_path(paths),
    };

    write_key_file(&target, &KeyHandle::generate(), args.force)?;

    println!("Key written to {}", target.display());
    println!("Keep this file safe: values encrypted with it cannot be recovered without it.");

    Ok(())
}
