//! Custom error types for envcrypt
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for envcrypt operations
#[derive(Error, Debug)]
pub enum EnvcryptError {
    /// A required file (env file or key file) does not exist
    #[error("{kind} not found: {}", path.display())]
    MissingFile { kind: &'static str, path: PathBuf },

    /// Key material could not be decoded
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The encryption primitive failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Malformed ciphertext or key mismatch
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Env file syntax errors
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid command-line input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl EnvcryptError {
    /// Create a "missing file" error for key material
    pub fn key_not_found(path: impl AsRef<Path>) -> Self {
        Self::MissingFile {
            kind: "Key file",
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a "missing file" error for the target env file
    pub fn env_file_not_found(path: impl AsRef<Path>) -> Self {
        Self::MissingFile {
            kind: "Env file",
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Check if this is a "missing file" error
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::MissingFile { .. })
    }
}

impl From<std::io::Error> for EnvcryptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvcryptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for envcrypt operations
pub type EnvcryptResult<T> = Result<T, EnvcryptError>;
