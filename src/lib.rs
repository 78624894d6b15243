//! envcrypt - selective encryption of .env file values
//!
//! Encrypts chosen values of a `NAME=VALUE` env file in place while leaving
//! the rest readable. Re-running is safe: values that already look encrypted
//! are left alone, and entries that are not targeted are carried through
//! untouched and in order.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `envfile`: ordered mapping, ciphertext detection, parsing and rendering
//! - `crypto`: key handles and AES-256-GCM value encryption
//! - `services`: the selective encryption logic
//! - `storage`: env file and key file I/O with atomic writes
//! - `config`: path resolution and user settings
//! - `audit`: append-only log of rewrites
//! - `cli`: command-line handlers
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use envcrypt::crypto::load_key;
//! use envcrypt::services::SelectiveEncryptor;
//! use envcrypt::storage::{read_env_file, write_env_file};
//!
//! let key = load_key("~/.config/envcrypt/default.key")?;
//! let existing = read_env_file(".env")?;
//! let outcome = SelectiveEncryptor::aes_gcm().encrypt_subset(&existing, &["DB_PASSWORD"], &key)?;
//! if let Some(map) = outcome.into_map() {
//!     write_env_file(".env", &map)?;
//! }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod envfile;
pub mod error;
pub mod services;
pub mod storage;

pub use crypto::{load_key, AesGcmPort, EncryptionPort, KeyHandle};
pub use envfile::{is_encrypted, EnvMap};
pub use error::{EnvcryptError, EnvcryptResult};
pub use services::{MergeOutcome, SelectiveEncryptor};
