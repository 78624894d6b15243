//! Configuration CLI commands

use clap::{Args, Subcommand};

use crate::config::{EnvcryptPaths, Settings};
use crate::error::EnvcryptResult;

/// Arguments for `envcrypt config`
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show resolved paths and settings (the default)
    Show,
    /// Change a setting (audit_enabled, default_key_file)
    Set {
        /// Setting name
        name: String,
        /// New value
        value: String,
    },
}

/// Show or change the persisted settings
pub fn handle_config_command(
    paths: &EnvcryptPaths,
    settings: &Settings,
    args: ConfigArgs,
) -> EnvcryptResult<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            println!("envcrypt Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Default key file: {}", settings.key_file_path(paths).display());
            println!();
            println!("Settings:");
            println!("  Audit enabled: {}", settings.audit_enabled);
        }
        ConfigAction::Set { name, value } => {
            let mut updated = settings.clone();
            updated.set(&name, &value)?;
            updated.save(paths)?;
            println!("Updated {} in {}", name, paths.settings_file().display());
        }
    }

    Ok(())
}
