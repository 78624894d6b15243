//! Append-only JSONL audit log
//!
//! Each rewrite of an env file adds one JSON object on its own line. Entries
//! are only ever appended; reading streams the file from the start.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::PathBuf;

use crate::error::{EnvcryptError, EnvcryptResult};

use super::entry::AuditEntry;

/// Writer and reader for the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry, creating the file and its parent directory if needed
    ///
    /// The entry is serialized before the file is opened and written with a
    /// single call, so a failed serialization never leaves a partial line.
    pub fn log(&self, entry: &AuditEntry) -> EnvcryptResult<()> {
        let mut line = serde_json::to_vec(entry)
            .map_err(|e| EnvcryptError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push(b'\n');

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EnvcryptError::Io(format!("Failed to create audit log directory: {}", e))
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| EnvcryptError::Io(format!("Failed to append audit entry: {}", e)))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> EnvcryptResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> EnvcryptResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count);
        self.for_each_entry(|entry| {
            if count == 0 {
                return;
            }
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        })?;
        Ok(window.into())
    }

    fn for_each_entry(&self, mut visit: impl FnMut(AuditEntry)) -> EnvcryptResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(EnvcryptError::Io(format!("Failed to open audit log: {}", e)));
            }
        };

        let stream =
            serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<AuditEntry>();
        for entry in stream {
            let entry = entry.map_err(|e| {
                EnvcryptError::Json(format!(
                    "Corrupt audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;
            visit(entry);
        }

        Ok(())
    }
}
