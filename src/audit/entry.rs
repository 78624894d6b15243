//! Audit entry data structures
//!
//! An entry records which names an operation touched in which file. Values
//! and key material are never part of an entry.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Existing values were encrypted by name
    Encrypt,
    /// Values were added or replaced
    Add,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Encrypt => write!(f, "ENCRYPT"),
            Operation::Add => write!(f, "ADD"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// The env file that was rewritten
    pub env_file: String,

    /// Names whose stored value changed
    #[serde(default)]
    pub keys: Vec<String>,

    /// How many of those values were encrypted by this operation
    #[serde(default)]
    pub encrypted: usize,
}

impl AuditEntry {
    /// Create a new entry stamped with the current time
    pub fn new(
        operation: Operation,
        env_file: &Path,
        keys: Vec<String>,
        encrypted: usize,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            env_file: env_file.display().to_string(),
            keys,
            encrypted,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let keys = if self.keys.is_empty() {
            "(no changes)".to_string()
        } else {
            self.keys.join(", ")
        };

        format!(
            "[{}] {} {}: {} ({} encrypted)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.env_file,
            keys,
            self.encrypted
        )
    }
}
