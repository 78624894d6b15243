//! Selective encryption of env file values
//!
//! Both operations are pure: they take the current mapping and return a new
//! one, leaving the write to the caller. An encryption error aborts the
//! whole request and yields no mapping at all.

use std::collections::HashSet;

use zeroize::Zeroizing;

use crate::crypto::{AesGcmPort, EncryptionPort, KeyHandle};
use crate::envfile::{is_encrypted, EnvMap};
use crate::error::EnvcryptResult;

/// Result of a selective encryption request
#[derive(Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A new mapping to write back
    Merged {
        map: EnvMap,
        /// Names whose stored value was encrypted or replaced
        changed: Vec<String>,
        /// How many values this request actually encrypted
        encrypted: usize,
    },
    /// The request was empty; nothing should be written
    NothingToDo,
}

impl MergeOutcome {
    pub fn is_nothing_to_do(&self) -> bool {
        matches!(self, Self::NothingToDo)
    }

    /// Get the merged mapping, if any
    pub fn into_map(self) -> Option<EnvMap> {
        match self {
            Self::Merged { map, .. } => Some(map),
            Self::NothingToDo => None,
        }
    }
}

/// Service encrypting a chosen subset of values
pub struct SelectiveEncryptor<P = AesGcmPort> {
    port: P,
}

impl SelectiveEncryptor<AesGcmPort> {
    /// Create a service backed by AES-256-GCM
    pub fn aes_gcm() -> Self {
        Self::new(AesGcmPort)
    }
}

impl<P: EncryptionPort> SelectiveEncryptor<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Encrypt the values of existing entries named in `names`
    ///
    /// Values that already look encrypted are left alone, so running this
    /// twice gives the same result as running it once. Names missing from
    /// `existing` are ignored. Order and untargeted values are preserved.
    pub fn encrypt_subset<S: AsRef<str>>(
        &self,
        existing: &EnvMap,
        names: &[S],
        key: &KeyHandle,
    ) -> EnvcryptResult<MergeOutcome> {
        if names.is_empty() {
            return Ok(MergeOutcome::NothingToDo);
        }

        let requested: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();

        let mut map = EnvMap::new();
        let mut changed = Vec::new();
        for (name, value) in existing.iter() {
            if requested.contains(name) && !is_encrypted(value) {
                map.insert(name, self.port.encrypt(value, key)?);
                changed.push(name.to_string());
            } else {
                map.insert(name, value);
            }
        }

        let encrypted = changed.len();
        Ok(MergeOutcome::Merged {
            map,
            changed,
            encrypted,
        })
    }

    /// Add new entries or replace existing ones, storing every supplied value encrypted
    ///
    /// Existing names are updated in place. New names are appended after all
    /// existing entries, in the order of `updates`. Supplied values that
    /// already look encrypted are stored as given.
    pub fn add_or_update(
        &self,
        existing: &EnvMap,
        updates: &EnvMap,
        key: &KeyHandle,
    ) -> EnvcryptResult<MergeOutcome> {
        if updates.is_empty() {
            return Ok(MergeOutcome::NothingToDo);
        }

        let mut sealed = EnvMap::new();
        let mut encrypted = 0;
        for (name, value) in updates.iter() {
            if is_encrypted(value) {
                sealed.insert(name, value);
            } else {
                sealed.insert(name, self.port.encrypt(value, key)?);
                encrypted += 1;
            }
        }

        let mut consumed = HashSet::new();
        let mut map = EnvMap::new();
        for (name, value) in existing.iter() {
            match sealed.get(name) {
                Some(replacement) => {
                    map.insert(name, replacement);
                    consumed.insert(name);
                }
                None => {
                    map.insert(name, value);
                }
            }
        }

        for (name, value) in sealed.iter() {
            if !consumed.contains(name) {
                map.insert(name, value);
            }
        }

        let changed = updates.names().map(str::to_string).collect();
        Ok(MergeOutcome::Merged {
            map,
            changed,
            encrypted,
        })
    }

    /// Decrypt the values of existing entries named in `names`
    ///
    /// Entries come back in file order. Values that are not encrypted are
    /// returned unchanged and missing names are skipped.
    pub fn reveal<S: AsRef<str>>(
        &self,
        existing: &EnvMap,
        names: &[S],
        key: &KeyHandle,
    ) -> EnvcryptResult<Vec<(String, Zeroizing<String>)>> {
        let requested: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();

        let mut revealed = Vec::new();
        for (name, value) in existing.iter() {
            if !requested.contains(name) {
                continue;
            }
            let plaintext = if is_encrypted(value) {
                self.port.decrypt(value, key)?
            } else {
                value.to_string()
            };
            revealed.push((name.to_string(), Zeroizing::new(plaintext)));
        }

        Ok(revealed)
    }
}
