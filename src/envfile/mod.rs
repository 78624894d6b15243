//! Env file model
//!
//! Provides the ordered mapping, ciphertext detection, parsing and
//! rendering of `NAME=VALUE` files.

pub mod classifier;
pub mod mapping;
pub mod parser;
pub mod serializer;

pub use classifier::is_encrypted;
pub use mapping::EnvMap;
pub use parser::parse;
pub use serializer::render;
