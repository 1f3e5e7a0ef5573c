//! Runtime policy for the validator and the file layer.
//!
//! Every knob has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! [validator]
//! min_key_len = 5
//! invisible_chars = ["\u200B", "\uFEFF"]
//!
//! [files]
//! encodings = ["utf-8"]
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_KEY_LEN: usize = 3;

/// Zero-width codepoints and the byte-order mark.
pub const INVISIBLE_CHARS: [char; 5] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub validator: ValidatorConfig,
    pub files: FileConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), Error> {
        if self.validator.min_key_len == 0 {
            return Err(Error::Config("validator.min_key_len must be at least 1"));
        }
        if self.files.encodings.is_empty() {
            return Err(Error::Config("files.encodings must list at least one encoding"));
        }
        Ok(())
    }
}

/// Key policy handed to [`crate::validate::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Minimum number of A-Z letters in the normalized key.
    pub min_key_len: usize,
    pub invisible_chars: Vec<char>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_key_len: MIN_KEY_LEN,
            invisible_chars: INVISIBLE_CHARS.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Tried in order until one decodes the whole file.
    pub encodings: Vec<TextEncoding>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            encodings: vec![TextEncoding::Utf8, TextEncoding::Latin1],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode the whole buffer, or `None` if it is not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            // ISO-8859-1 maps each byte to the codepoint of the same value.
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}
