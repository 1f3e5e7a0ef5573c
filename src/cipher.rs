use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::key::expand;
use crate::normalize::normalize;
use crate::validate::ValidationResult;

const ALPHABET_LEN: u8 = 26;

/// Result of a decryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decrypted {
    pub text: String,
    /// Set when the output holds no letters at all, which usually means the wrong key.
    /// Advisory only; `text` is still the exact inverse transform.
    pub likely_wrong_key: bool,
}

impl Decrypted {
    pub fn into_text(self) -> String {
        self.text
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Inverse,
}

/// Vigenère engine bound to a key policy.
#[derive(Clone, Debug, Default)]
pub struct Vigenere {
    config: ValidatorConfig,
}

impl Vigenere {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, text: &str, key: &str) -> ValidationResult {
        crate::validate::validate(text, key, &self.config)
    }

    /// Encrypt the letters of `text`. The output is uppercase A-Z only and as long as
    /// `normalize(text)`; everything else in `text` is discarded.
    pub fn encrypt(&self, text: &str, key: &str) -> Result<String, ValidationError> {
        self.validate(text, key)?;
        let text = normalize(text);
        let key = expand(&text, key)?;
        Ok(shift(&text, &key, Direction::Forward))
    }

    pub fn decrypt(&self, text: &str, key: &str) -> Result<Decrypted, ValidationError> {
        self.validate(text, key)?;
        let text = normalize(text);
        let key = expand(&text, key)?;
        let plain = shift(&text, &key, Direction::Inverse);
        let likely_wrong_key = !plain.bytes().any(|b| b.is_ascii_uppercase());
        Ok(Decrypted {
            text: plain,
            likely_wrong_key,
        })
    }
}

/// Encrypt with the default key policy.
pub fn encrypt(text: &str, key: &str) -> Result<String, ValidationError> {
    Vigenere::default().encrypt(text, key)
}

/// Decrypt with the default key policy.
pub fn decrypt(text: &str, key: &str) -> Result<Decrypted, ValidationError> {
    Vigenere::default().decrypt(text, key)
}

/// Validate with the default key policy.
pub fn validate(text: &str, key: &str) -> ValidationResult {
    Vigenere::default().validate(text, key)
}

// Both inputs are A-Z only and of equal length.
fn shift(text: &str, key: &str, direction: Direction) -> String {
    debug_assert_eq!(text.len(), key.len());
    text.bytes()
        .zip(key.bytes())
        .map(|(t, k)| {
            let t = t - b'A';
            let k = k - b'A';
            let out = match direction {
                Direction::Forward => (t + k) % ALPHABET_LEN,
                Direction::Inverse => (t + ALPHABET_LEN - k) % ALPHABET_LEN,
            };
            char::from(b'A' + out)
        })
        .collect()
}
