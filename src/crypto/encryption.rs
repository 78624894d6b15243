//! AES-256-GCM encryption of single values
//!
//! Values are sealed into a hex envelope:
//!
//! ```text
//! header (de f5 02 00) || nonce (12 bytes) || ciphertext + tag
//! ```
//!
//! The header doubles as associated data, so a rewritten header fails
//! authentication. Hex encoding keeps the result safe to store unquoted in an
//! env file and makes it recognisable by [`crate::envfile::is_encrypted`].

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce,
};

use crate::error::{EnvcryptError, EnvcryptResult};

use super::KeyHandle;

/// Envelope header; hex-encodes to `def50200`
const ENVELOPE_HEADER: [u8; 4] = [0xde, 0xf5, 0x02, 0x00];

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
const TAG_SIZE: usize = 16;

/// String-level authenticated encryption used by the selective encryptor
pub trait EncryptionPort {
    /// Encrypt a plaintext value into an envelope string
    fn encrypt(&self, plaintext: &str, key: &KeyHandle) -> EnvcryptResult<String>;

    /// Decrypt an envelope string back into the original plaintext
    fn decrypt(&self, ciphertext: &str, key: &KeyHandle) -> EnvcryptResult<String>;
}

/// The default AES-256-GCM implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmPort;

impl EncryptionPort for AesGcmPort {
    fn encrypt(&self, plaintext: &str, key: &KeyHandle) -> EnvcryptResult<String> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| EnvcryptError::Encryption(format!("Failed to create cipher: {}", e)))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = cipher
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &ENVELOPE_HEADER,
                },
            )
            .map_err(|e| EnvcryptError::Encryption(format!("Encryption failed: {}", e)))?;

        let mut envelope = Vec::with_capacity(ENVELOPE_HEADER.len() + NONCE_SIZE + sealed.len());
        envelope.extend_from_slice(&ENVELOPE_HEADER);
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&sealed);

        Ok(hex::encode(envelope))
    }

    fn decrypt(&self, ciphertext: &str, key: &KeyHandle) -> EnvcryptResult<String> {
        let raw = hex::decode(ciphertext).map_err(|e| {
            EnvcryptError::Decryption(format!("Invalid ciphertext encoding: {}", e))
        })?;

        if raw.len() < ENVELOPE_HEADER.len() + NONCE_SIZE + TAG_SIZE {
            return Err(EnvcryptError::Decryption(format!(
                "Ciphertext too short: {} bytes",
                raw.len()
            )));
        }

        let (header, rest) = raw.split_at(ENVELOPE_HEADER.len());
        if header != ENVELOPE_HEADER {
            return Err(EnvcryptError::Decryption(
                "Unsupported envelope version".to_string(),
            ));
        }
        let (nonce_bytes, sealed) = rest.split_at(NONCE_SIZE);

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| EnvcryptError::Decryption(format!("Failed to create cipher: {}", e)))?;

        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: sealed,
                    aad: &ENVELOPE_HEADER,
                },
            )
            .map_err(|_| {
                EnvcryptError::Decryption(
                    "Decryption failed: invalid key or corrupted data".to_string(),
                )
            })?;

        String::from_utf8(plaintext).map_err(|e| {
            EnvcryptError::Decryption(format!("Invalid UTF-8 in decrypted data: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envfile::is_encrypted;

    #[test]
    fn test_encrypt_decrypt() {
        let key = KeyHandle::generate();
        let port = AesGcmPort;

        let encrypted = port.encrypt("Hello World!", &key).unwrap();
        let decrypted = port.decrypt(&encrypted, &key).unwrap();

        assert_ne!(encrypted, "Hello World!");
        assert_eq!(decrypted, "Hello World!");
    }

    #[test]
    fn test_envelope_format() {
        let key = KeyHandle::generate();
        let encrypted = AesGcmPort.encrypt("test data", &key).unwrap();

        assert!(encrypted.starts_with("def502"));
        assert!(encrypted.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(encrypted.len() > 50);
        assert!(is_encrypted(&encrypted));
    }

    #[test]
    fn test_empty_plaintext_is_still_an_envelope() {
        let key = KeyHandle::generate();
        let encrypted = AesGcmPort.encrypt("", &key).unwrap();

        assert!(is_encrypted(&encrypted));
        assert_eq!(AesGcmPort.decrypt(&encrypted, &key).unwrap(), "");
    }

    #[test]
    fn test_different_nonces() {
        let key = KeyHandle::generate();
        let encrypted1 = AesGcmPort.encrypt("same", &key).unwrap();
        let encrypted2 = AesGcmPort.encrypt("same", &key).unwrap();
        assert_ne!(encrypted1, encrypted2);
    }

    #[test]
    fn test_uppercase_envelope_decrypts() {
        let key = KeyHandle::generate();
        let encrypted = AesGcmPort.encrypt("value", &key).unwrap();
        let upper = encrypted.to_uppercase();
        assert_eq!(AesGcmPort.decrypt(&upper, &key).unwrap(), "value");
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = KeyHandle::generate();
        let key2 = KeyHandle::generate();

        let encrypted = AesGcmPort.encrypt("secret", &key1).unwrap();
        let err = AesGcmPort.decrypt(&encrypted, &key2).unwrap_err();
        assert!(matches!(err, EnvcryptError::Decryption(_)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = KeyHandle::generate();
        let encrypted = AesGcmPort.encrypt("secret", &key).unwrap();

        let mut raw = hex::decode(&encrypted).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xFF;

        assert!(AesGcmPort.decrypt(&hex::encode(raw), &key).is_err());
    }

    #[test]
    fn test_tampered_header_fails() {
        let key = KeyHandle::generate();
        let encrypted = AesGcmPort.encrypt("secret", &key).unwrap();
        let rewritten = format!("def50300{}", &encrypted[8..]);

        let err = AesGcmPort.decrypt(&rewritten, &key).unwrap_err();
        assert!(err.to_string().contains("Unsupported envelope version"));
    }

    #[test]
    fn test_malformed_ciphertext_fails() {
        let key = KeyHandle::generate();
        assert!(AesGcmPort.decrypt("plain text", &key).is_err());
        assert!(AesGcmPort.decrypt("def50200abcd", &key).is_err());
    }

    #[test]
    fn test_unicode_round_trip() {
        let key = KeyHandle::generate();
        let plaintext = "pässwörd = 秘密 #1";
        let encrypted = AesGcmPort.encrypt(plaintext, &key).unwrap();
        assert_eq!(AesGcmPort.decrypt(&encrypted, &key).unwrap(), plaintext);
    }
}
