//! Business logic layer
//!
//! Services operate on already-parsed data and never touch the filesystem.

pub mod selective;

pub use selective::{MergeOutcome, SelectiveEncryptor};
