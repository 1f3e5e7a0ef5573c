use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::normalize::normalize;

pub type ValidationResult = Result<(), ValidationError>;

/// Gate a (text, key) pair before encryption or decryption.
///
/// Checks run in a fixed order and the first failure wins; each check assumes the
/// earlier ones passed. Keys are never repaired: a key with digits, punctuation,
/// accents or surrounding spaces is rejected even when it still holds enough letters,
/// so nobody ends up encrypting with a shorter key than the one they typed.
pub fn validate(text: &str, key: &str, config: &ValidatorConfig) -> ValidationResult {
    if is_blank(key) {
        return Err(ValidationError::EmptyKey);
    }

    let invisible = find_invisible(key, &config.invisible_chars);
    if !invisible.is_empty() {
        return Err(ValidationError::InvisibleCharacters(invisible));
    }

    let normalized_key = normalize(key);
    if normalized_key.is_empty() {
        return Err(ValidationError::KeyHasNoLetters);
    }
    if normalized_key.len() < config.min_key_len {
        return Err(ValidationError::KeyTooShort {
            min: config.min_key_len,
            found: normalized_key.len(),
        });
    }
    if normalized_key != key.to_uppercase() {
        return Err(ValidationError::KeyHasInvalidCharacters {
            key: key.to_owned(),
            valid: normalized_key,
        });
    }

    if is_blank(text) {
        return Err(ValidationError::EmptyText);
    }
    if normalize(text).is_empty() {
        return Err(ValidationError::TextHasNoLetters);
    }

    Ok(())
}

/// Empty, or nothing but whitespace. Besides Unicode `White_Space` this counts the
/// information separators U+001C..=U+001F, which text tooling commonly treats as
/// line and field breaks.
fn is_blank(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c))
}

/// Every occurrence of a blocked codepoint, in input order.
pub fn find_invisible(key: &str, blocked: &[char]) -> Vec<char> {
    key.chars().filter(|c| blocked.contains(c)).collect()
}
