//! Audit logging system for envcrypt
//!
//! Records every env file rewrite in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: one rewrite, with timestamp, operation, file path, the
//!   names whose values changed and how many were newly encrypted. Never the
//!   values themselves.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use envcrypt::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::new(Operation::Encrypt, &env_file, changed, encrypted))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
