use std::path::PathBuf;
use thiserror::Error;

/// Why a (text, key) pair was refused before any cipher work ran.
///
/// Checks run in declaration order and stop at the first failure, so a key that is
/// both too short and full of digits reports [`KeyTooShort`](Self::KeyTooShort).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("key must not be empty")]
    EmptyKey,

    #[error(
        "key contains invisible or illegal characters ({}); check it and enter it again",
        codepoints(.0)
    )]
    InvisibleCharacters(Vec<char>),

    #[error("key must contain at least one letter A-Z")]
    KeyHasNoLetters,

    #[error("key must have at least {min} letters (found {found})")]
    KeyTooShort { min: usize, found: usize },

    #[error(
        "key contains invalid characters (only letters A-Z are allowed)\n\
         key entered: {key}\n\
         valid part would be: {valid}"
    )]
    KeyHasInvalidCharacters { key: String, valid: String },

    #[error("text must not be empty")]
    EmptyText,

    #[error("text must contain at least one letter A-Z")]
    TextHasNoLetters,
}

/// `U+200B, U+FEFF` style listing.
fn codepoints(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("U+{:04X}", u32::from(*c)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure to turn a source file into text.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("input file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not decode {} as any of: {tried}", .path.display())]
    Undecodable { path: PathBuf, tried: String },

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    InvalidArgs(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to overwrite existing path: {}", .0.display())]
    WouldOverwrite(PathBuf),

    #[error("refusing to write output over its own input: {}", .0.display())]
    SameFile(PathBuf),

    #[error("keyfile too large (maximum 4 KiB)")]
    KeyfileTooLarge,

    #[error("could not parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Config(&'static str),
}
