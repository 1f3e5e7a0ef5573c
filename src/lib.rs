//! scriptum library API
//!
//! Classical Vigenère over the 26-letter Latin alphabet. Input text and keys are reduced
//! to uppercase A-Z before use; keys are validated strictly and never repaired.
//! Vigenère is a teaching cipher and offers no real confidentiality.
//!
//! The binary in main.rs wraps this with a CLI and file handling.

pub mod cipher;
pub mod config;
pub mod error;
pub mod files;
pub mod key;
pub mod normalize;
pub mod validate;

pub use cipher::{decrypt, encrypt, validate, Decrypted, Vigenere};
pub use config::{Config, FileConfig, TextEncoding, ValidatorConfig};
pub use error::{Error, ReadError, ValidationError};
pub use files::{read_text_file, write_text_file, FileCipher};
pub use key::expand;
pub use normalize::normalize;
pub use validate::ValidationResult;
