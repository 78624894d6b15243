//! Storage layer for envcrypt
//!
//! Reads env files into ordered mappings and writes them back atomically;
//! also persists generated key files.

pub mod file_io;

pub use file_io::{read_env_file, write_env_file, write_key_file};
