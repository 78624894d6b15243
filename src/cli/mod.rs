//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod config;
pub mod env;
pub mod key;

pub use audit::{handle_log_command, LogArgs};
pub use config::{handle_config_command, ConfigAction, ConfigArgs};
pub use env::{
    handle_add_command, handle_encrypt_command, handle_reveal_command, handle_status_command,
    AddArgs, EncryptArgs, RevealArgs, StatusArgs,
};
pub use key::{handle_keygen_command, KeygenArgs};
