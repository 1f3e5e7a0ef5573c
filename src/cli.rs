use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scriptum", version)]
#[command(about = "Encrypt/decrypt A-Z text and .txt files with the classical Vigenère cipher.")]
#[command(after_help = "With no command, runs a demo that writes sample files into ./data.\n\
    Options go before TEXT and KEY, which may themselves start with `-`.")]
pub struct Cli {
    /// TOML file overriding the key policy and input encodings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// More log output (-v debug, -vv trace). SCRIPTUM_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt TEXT and print the ciphertext.
    #[command(name = "cifrar", aliases = ["CIFRAR", "Cifrar"], visible_alias = "encrypt")]
    Cifrar {
        /// Text to encrypt, or `-` to read it from stdin.
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[arg(allow_hyphen_values = true)]
        key: Option<String>,
        #[arg(long, conflicts_with = "key")]
        keyfile: Option<PathBuf>,
    },
    /// Decrypt TEXT and print the plaintext.
    #[command(name = "descifrar", aliases = ["DESCIFRAR", "Descifrar"], visible_alias = "decrypt")]
    Descifrar {
        /// Text to decrypt, or `-` to read it from stdin.
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[arg(allow_hyphen_values = true)]
        key: Option<String>,
        #[arg(long, conflicts_with = "key")]
        keyfile: Option<PathBuf>,
    },
    /// Encrypt INPUT_FILE into OUTPUT_FILE.
    #[command(name = "cifrar-archivo", aliases = ["CIFRAR-ARCHIVO", "Cifrar-Archivo"], visible_alias = "encrypt-file")]
    CifrarArchivo {
        input_file: PathBuf,
        output_file: PathBuf,
        #[arg(allow_hyphen_values = true)]
        key: Option<String>,
        #[arg(long, conflicts_with = "key")]
        keyfile: Option<PathBuf>,
        /// Replace OUTPUT_FILE if it exists.
        #[arg(long)]
        force: bool,
    },
    /// Decrypt INPUT_FILE into OUTPUT_FILE.
    #[command(name = "descifrar-archivo", aliases = ["DESCIFRAR-ARCHIVO", "Descifrar-Archivo"], visible_alias = "decrypt-file")]
    DescifrarArchivo {
        input_file: PathBuf,
        output_file: PathBuf,
        #[arg(allow_hyphen_values = true)]
        key: Option<String>,
        #[arg(long, conflicts_with = "key")]
        keyfile: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Encrypt and decrypt a sample text and sample files.
    Demo {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}
