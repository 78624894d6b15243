//! Audit log CLI command

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::EnvcryptPaths;
use crate::error::EnvcryptResult;

/// Arguments for `envcrypt log`
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Show the most recent audit entries
pub fn handle_log_command(paths: &EnvcryptPaths, args: LogArgs) -> EnvcryptResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No audit entries recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
