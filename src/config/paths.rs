//! Path management for envcrypt
//!
//! Resolves the application directory holding settings, the audit log and
//! the default key file, and expands `~` in user-supplied paths.
//!
//! ## Path Resolution Order
//!
//! 1. `ENVCRYPT_HOME` environment variable (if set)
//! 2. Platform config directory joined with `envcrypt`
//!    (`~/.config/envcrypt` on Linux)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::EnvcryptError;

/// Environment variable overriding the application directory
pub const HOME_ENV_VAR: &str = "ENVCRYPT_HOME";

/// Manages all paths used by envcrypt
#[derive(Debug, Clone)]
pub struct EnvcryptPaths {
    base_dir: PathBuf,
}

impl EnvcryptPaths {
    /// Create a new EnvcryptPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform config
    /// directory cannot be determined.
    pub fn new() -> Result<Self, EnvcryptError> {
        let base_dir = if let Ok(custom) = std::env::var(HOME_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            BaseDirs::new()
                .map(|dirs| dirs.config_dir().join("envcrypt"))
                .ok_or_else(|| {
                    EnvcryptError::Config("Could not determine config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create EnvcryptPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the fallback location for generated keys
    pub fn default_key_file(&self) -> PathBuf {
        self.base_dir.join("default.key")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), EnvcryptError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EnvcryptError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Expand a leading `~` to the current user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    expand_tilde_with(path, home.as_deref())
}

/// Expand a leading `~` against an explicit home directory
///
/// Only `~` and `~/...` are expanded; `~user` forms and paths without a
/// leading tilde are returned unchanged, as is everything when `home` is
/// unknown.
pub fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        return home.to_path_buf();
    }

    match path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvcryptPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(paths.default_key_file(), temp_dir.path().join("default.key"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(HOME_ENV_VAR, custom_path);
        let paths = EnvcryptPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
        env::remove_var(HOME_ENV_VAR);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvcryptPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }

    #[test]
    fn test_expand_tilde_prefix() {
        let home = Path::new("/home/tester");
        assert_eq!(
            expand_tilde_with("~/.keys/app.key", Some(home)),
            PathBuf::from("/home/tester/.keys/app.key")
        );
        assert_eq!(expand_tilde_with("~", Some(home)), PathBuf::from("/home/tester"));
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        let home = Path::new("/home/tester");
        assert_eq!(
            expand_tilde_with("/etc/app.key", Some(home)),
            PathBuf::from("/etc/app.key")
        );
        assert_eq!(
            expand_tilde_with("keys/~/app.key", Some(home)),
            PathBuf::from("keys/~/app.key")
        );
        assert_eq!(
            expand_tilde_with("~other/app.key", Some(home)),
            PathBuf::from("~other/app.key")
        );
    }

    #[test]
    fn test_expand_tilde_without_home() {
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
    }
}
