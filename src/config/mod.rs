//! Configuration module for envcrypt
//!
//! This module provides configuration management including:
//! - Application directory resolution and `~` expansion
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::{expand_tilde, EnvcryptPaths};
pub use settings::Settings;
