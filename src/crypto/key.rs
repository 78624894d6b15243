//! Symmetric key material
//!
//! A [`KeyHandle`] wraps a 256-bit AES key. On disk it is stored as an
//! ASCII-safe base64 string. The bytes are zeroed when the handle is dropped
//! and never appear in `Debug` output.

use std::fmt;
use std::path::Path;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::paths::expand_tilde;
use crate::error::{EnvcryptError, EnvcryptResult};

/// Size of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Opaque key used for both encryption and decryption
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyHandle {
    bytes: [u8; KEY_SIZE],
}

impl KeyHandle {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Decode a key from its ASCII-safe representation
    ///
    /// Surrounding whitespace (such as a trailing newline) is ignored.
    pub fn from_ascii_safe(encoded: &str) -> EnvcryptResult<Self> {
        let decoded = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| EnvcryptError::InvalidKey(format!("Invalid key encoding: {}", e)))?,
        );

        if decoded.len() != KEY_SIZE {
            return Err(EnvcryptError::InvalidKey(format!(
                "Invalid key size: expected {} bytes, got {}",
                KEY_SIZE,
                decoded.len()
            )));
        }

        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Encode the key as an ASCII-safe string suitable for a key file
    pub fn to_ascii_safe(&self) -> Zeroizing<String> {
        Zeroizing::new(STANDARD.encode(self.bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyHandle([REDACTED])")
    }
}

/// Load a key from a file path
///
/// A leading `~` is expanded to the home directory before the existence
/// check. A path that does not resolve to a regular file is reported as a
/// missing key file.
pub fn load_key(path: &str) -> EnvcryptResult<KeyHandle> {
    let resolved = expand_tilde(path);
    load_key_from(&resolved)
}

/// Load a key from an already-resolved path
pub fn load_key_from(path: &Path) -> EnvcryptResult<KeyHandle> {
    if !path.is_file() {
        return Err(EnvcryptError::key_not_found(path));
    }

    let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
        EnvcryptError::Io(format!("Failed to read key file {}: {}", path.display(), e))
    })?);

    KeyHandle::from_ascii_safe(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ascii_safe_round_trip() {
        let key = KeyHandle::generate();
        let encoded = key.to_ascii_safe();
        let decoded = KeyHandle::from_ascii_safe(&encoded).unwrap();
        assert_eq!(key.as_bytes(), decoded.as_bytes());
    }

    #[test]
    fn test_generated_keys_differ() {
        let key1 = KeyHandle::generate();
        let key2 = KeyHandle::generate();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_trailing_newline_ignored() {
        let key = KeyHandle::generate();
        let encoded = format!("{}\n", key.to_ascii_safe().as_str());
        assert!(KeyHandle::from_ascii_safe(&encoded).is_ok());
    }

    #[test]
    fn test_wrong_size_rejected() {
        let short = STANDARD.encode([1u8; 16]);
        let err = KeyHandle::from_ascii_safe(&short).unwrap_err();
        assert!(matches!(err, EnvcryptError::InvalidKey(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = KeyHandle::from_ascii_safe("not a key!!").unwrap_err();
        assert!(matches!(err, EnvcryptError::InvalidKey(_)));
    }

    #[test]
    fn test_debug_redacted() {
        let key = KeyHandle::generate();
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(key.to_ascii_safe().as_str()));
    }

    #[test]
    fn test_load_key_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.key");
        let key = KeyHandle::generate();
        std::fs::write(&path, key.to_ascii_safe().as_bytes()).unwrap();

        let loaded = load_key(path.to_str().unwrap()).unwrap();
        assert_eq!(key.as_bytes(), loaded.as_bytes());
    }

    #[test]
    fn test_load_missing_key() {
        let err = load_key("/non/existent/key/file").unwrap_err();
        assert!(err.is_missing_file());
        assert!(err.to_string().contains("Key file not found"));
    }

    #[test]
    fn test_load_directory_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_key_from(temp_dir.path()).unwrap_err();
        assert!(err.is_missing_file());
    }
}
