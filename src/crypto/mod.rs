//! Cryptographic functions for envcrypt
//!
//! Provides AES-256-GCM encryption of individual values and loading of the
//! symmetric key material they are sealed with.

pub mod encryption;
pub mod key;

pub use encryption::{AesGcmPort, EncryptionPort};
pub use key::{load_key, load_key_from, KeyHandle, KEY_SIZE};
