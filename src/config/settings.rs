//! User settings for envcrypt
//!
//! Manages user preferences: whether operations are recorded in the audit
//! log and where `keygen` writes keys by default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::{expand_tilde, EnvcryptPaths};
use crate::error::EnvcryptError;

/// User settings for envcrypt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether successful writes are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Where `keygen` writes when no path is given (may start with `~`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_key_file: Option<String>,
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audit_enabled: default_audit_enabled(),
            default_key_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &EnvcryptPaths) -> Result<Self, EnvcryptError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EnvcryptError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                EnvcryptError::Config(format!("Failed to parse settings file: {}", e))
            })
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EnvcryptPaths) -> Result<(), EnvcryptError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| EnvcryptError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EnvcryptError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Update one setting from its command-line form
    ///
    /// `default_key_file` is cleared by an empty value or `none`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvcryptError> {
        match name {
            "audit_enabled" => {
                self.audit_enabled = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => {
                        return Err(EnvcryptError::Validation(format!(
                            "Expected true or false for audit_enabled, got '{}'",
                            other
                        )))
                    }
                };
            }
            "default_key_file" => {
                let value = value.trim();
                self.default_key_file = if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            other => {
                return Err(EnvcryptError::Validation(format!(
                    "Unknown setting '{}' (expected audit_enabled or default_key_file)",
                    other
                )))
            }
        }
        Ok(())
    }

    /// Resolve where a generated key should go when no path is given
    pub fn key_file_path(&self, paths: &EnvcryptPaths) -> PathBuf {
        match &self.default_key_file {
            Some(path) => expand_tilde(path),
            None => paths.default_key_file(),
        }
    }
}
