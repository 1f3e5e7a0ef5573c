use crate::error::{Error, ValidationError};
use crate::normalize::normalize;
use std::path::Path;
use zeroize::Zeroizing;

const MAX_KEYFILE_BYTES: u64 = 4 * 1024;

/// Repeat the normalized key and cut it to exactly `text.len()` letters.
///
/// `text` must already be normalized. The key is normalized again here; an empty
/// result means validation was skipped and is reported as
/// [`ValidationError::KeyHasNoLetters`].
pub fn expand(text: &str, key: &str) -> Result<String, ValidationError> {
    let key = normalize(key);
    if key.is_empty() {
        return Err(ValidationError::KeyHasNoLetters);
    }
    Ok(key.chars().cycle().take(text.len()).collect())
}

/// Read a key from a file.
///
/// - Size cap: 4 KiB
/// - Permission check: fails if world-readable on Unix
/// - Must be UTF-8; a single trailing line ending is dropped, nothing else is trimmed,
///   so stray spaces still reach the validator and get the key rejected
pub fn read_keyfile(path: &Path) -> Result<Zeroizing<String>, Error> {
    let meta = std::fs::metadata(path)?;
    if !meta.is_file() {
        return Err(Error::InvalidArgs("keyfile must be a regular file"));
    }
    if meta.len() > MAX_KEYFILE_BYTES {
        return Err(Error::KeyfileTooLarge);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if meta.permissions().mode() & 0o004 != 0 {
            return Err(Error::InvalidArgs(
                "keyfile is world-readable (use chmod 600)",
            ));
        }
    }

    let bytes = Zeroizing::new(std::fs::read(path)?);
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| Error::InvalidArgs("keyfile is not valid UTF-8"))?;
    let line = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    Ok(Zeroizing::new(line.to_owned()))
}
