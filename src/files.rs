//! File collaborator: read text with an encoding fallback, run the cipher, write the
//! result next to (never over) the source.
//!
//! Files are read whole. Output is the cipher's letters-only text, written as UTF-8.

use crate::cipher::{Decrypted, Vigenere};
use crate::config::{Config, TextEncoding};
use crate::error::{Error, ReadError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Read `path` as text, trying each encoding in order.
pub fn read_text_file(path: &Path, encodings: &[TextEncoding]) -> Result<String, ReadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
        _ => ReadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    for (attempt, encoding) in encodings.iter().enumerate() {
        if let Some(text) = encoding.decode(&bytes) {
            if attempt > 0 {
                warn!(
                    path = %path.display(),
                    encoding = encoding.label(),
                    "input was not {}, decoded with fallback",
                    encodings[0].label()
                );
            }
            return Ok(text);
        }
        debug!(path = %path.display(), encoding = encoding.label(), "decode failed");
    }

    Err(ReadError::Undecodable {
        path: path.to_path_buf(),
        tried: encodings
            .iter()
            .map(|e| e.label())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Write `contents` as UTF-8. An existing `path` is only replaced when `force` is set.
///
/// The text is staged in a temporary file next to `path` and renamed into place, so a
/// failed write leaves any previous file untouched and no partial output behind.
pub fn write_text_file(path: &Path, contents: &str, force: bool) -> Result<(), Error> {
    if path.exists() && !force {
        return Err(Error::WouldOverwrite(path.to_path_buf()));
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Created 0o600 on unix.
    let mut staged = NamedTempFile::new_in(dir).map_err(|source| write_error(path, source))?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|()| staged.flush())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|source| write_error(path, source))?;

    let persisted = if force {
        staged.persist(path)
    } else {
        staged.persist_noclobber(path)
    };
    persisted.map_err(|e| match e.error.kind() {
        ErrorKind::AlreadyExists if !force => Error::WouldOverwrite(path.to_path_buf()),
        _ => write_error(path, e.error),
    })?;

    info!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Canonical form of a path that may not exist yet.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = fs::canonicalize(path) {
        return Some(p);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|p| p.join(name))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (resolve(a), resolve(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

/// Runs the cipher over whole files.
#[derive(Clone, Debug)]
pub struct FileCipher {
    engine: Vigenere,
    encodings: Vec<TextEncoding>,
    force: bool,
}

impl FileCipher {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: Vigenere::new(config.validator.clone()),
            encodings: config.files.encodings.clone(),
            force: false,
        }
    }

    /// Allow replacing an existing output file. The input is never replaced.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn encrypt_file(&self, input: &Path, output: &Path, key: &str) -> Result<(), Error> {
        let text = self.load(input, output)?;
        let cipher_text = self.engine.encrypt(&text, key)?;
        write_text_file(output, &cipher_text, self.force)?;
        info!(input = %input.display(), output = %output.display(), "file encrypted");
        Ok(())
    }

    /// Decrypt `input` into `output` and hand back the advisory alongside the text.
    pub fn decrypt_file(&self, input: &Path, output: &Path, key: &str) -> Result<Decrypted, Error> {
        let text = self.load(input, output)?;
        let decrypted = self.engine.decrypt(&text, key)?;
        if decrypted.likely_wrong_key {
            warn!(input = %input.display(), "possible wrong key: result has no readable letters");
        }
        write_text_file(output, &decrypted.text, self.force)?;
        info!(input = %input.display(), output = %output.display(), "file decrypted");
        Ok(decrypted)
    }

    // Path guards run before the source is read.
    fn load(&self, input: &Path, output: &Path) -> Result<String, Error> {
        if !input.exists() {
            return Err(ReadError::NotFound(input.to_path_buf()).into());
        }
        if same_file(input, output) {
            return Err(Error::SameFile(output.to_path_buf()));
        }
        if output.exists() && !self.force {
            return Err(Error::WouldOverwrite(output.to_path_buf()));
        }
        Ok(read_text_file(input, &self.encodings)?)
    }
}
