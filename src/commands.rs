use crate::cli::{Cli, Command};
use scriptum::key::read_keyfile;
use scriptum::{Config, Error, FileCipher, Vigenere};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{error, info, warn};
use zeroize::Zeroizing;

const DEMO_TEXT: &str = "ATAQUE AL AMANECER";
const DEMO_KEY: &str = "CLAVE";
const DEMO_MESSAGE: &str = "Este es un mensaje secreto para probar el cifrado Vigenere.";

pub fn run(cli: Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Some(Command::Cifrar { text, key, keyfile }) => {
            let text = read_text_arg(text)?;
            let key = resolve_key(key, keyfile.as_deref())?;
            let engine = Vigenere::new(config.validator);
            println!("{}", engine.encrypt(&text, &key)?);
            Ok(())
        }
        Some(Command::Descifrar { text, key, keyfile }) => {
            let text = read_text_arg(text)?;
            let key = resolve_key(key, keyfile.as_deref())?;
            let engine = Vigenere::new(config.validator);
            let decrypted = engine.decrypt(&text, &key)?;
            if decrypted.likely_wrong_key {
                warn!("possible wrong key: result has no readable letters");
            }
            println!("{}", decrypted.text);
            Ok(())
        }
        Some(Command::CifrarArchivo {
            input_file,
            output_file,
            key,
            keyfile,
            force,
        }) => {
            let key = resolve_key(key, keyfile.as_deref())?;
            FileCipher::new(&config)
                .force(force)
                .encrypt_file(&input_file, &output_file, &key)?;
            eprintln!("Encryption successful: {}", output_file.display());
            Ok(())
        }
        Some(Command::DescifrarArchivo {
            input_file,
            output_file,
            key,
            keyfile,
            force,
        }) => {
            let key = resolve_key(key, keyfile.as_deref())?;
            FileCipher::new(&config)
                .force(force)
                .decrypt_file(&input_file, &output_file, &key)?;
            eprintln!("Decryption successful: {}", output_file.display());
            Ok(())
        }
        Some(Command::Demo { data_dir }) => demo(&config, &data_dir),
        None => demo(&config, Path::new("data")),
    }
}

/// `-` means stdin, anything else is the text itself.
fn read_text_arg(text: String) -> Result<String, Error> {
    if text != "-" {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn resolve_key(key: Option<String>, keyfile: Option<&Path>) -> Result<Zeroizing<String>, Error> {
    if let Some(key) = key {
        return Ok(Zeroizing::new(key));
    }
    if let Some(path) = keyfile {
        return read_keyfile(path);
    }
    prompt_key()
}

fn prompt_key() -> Result<Zeroizing<String>, Error> {
    entered_key(rpassword::prompt_password("Key: "))
}

// Terminal errors (no tty, EOF, interrupted) surface with their own message.
fn entered_key(entered: std::io::Result<String>) -> Result<Zeroizing<String>, Error> {
    Ok(Zeroizing::new(entered?))
}

fn demo(config: &Config, data_dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(data_dir)?;
    let original = data_dir.join("mensaje.txt");
    let encrypted = data_dir.join("mensaje_cifrado.txt");
    let decrypted = data_dir.join("mensaje_descifrado.txt");

    info!("=== Vigenère demo ===");
    info!(text = DEMO_TEXT, key = DEMO_KEY, "demo input");
    let engine = Vigenere::new(config.validator.clone());
    match engine.encrypt(DEMO_TEXT, DEMO_KEY) {
        Ok(cipher_text) => {
            println!("Encrypted : {cipher_text}");
            let plain = engine.decrypt(&cipher_text, DEMO_KEY)?;
            println!("Decrypted : {}", plain.text);
        }
        // A custom policy may reject the demo key; the file part still runs.
        Err(err) => error!("{err}"),
    }

    if !original.exists() {
        scriptum::write_text_file(&original, DEMO_MESSAGE, false)?;
    }

    // Demo outputs are regenerated on every run.
    let files = FileCipher::new(config).force(true);
    info!("=== encrypting file ===");
    run_file_step(|| files.encrypt_file(&original, &encrypted, DEMO_KEY), &encrypted);
    info!("=== decrypting file ===");
    run_file_step(
        || files.decrypt_file(&encrypted, &decrypted, DEMO_KEY).map(drop),
        &decrypted,
    );
    Ok(())
}

fn run_file_step(step: impl FnOnce() -> Result<(), Error>, output: &Path) {
    match step() {
        Ok(()) => println!("Wrote {}", output.display()),
        Err(err) => error!("{err}"),
    }
}
