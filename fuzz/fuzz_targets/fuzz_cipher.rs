#![no_main]
#[cfg(not(windows))]
use libfuzzer_sys::fuzz_target;
#[cfg(not(windows))]
use scriptum::{decrypt, encrypt, normalize, validate};

#[cfg(not(windows))]
fuzz_target!(|data: &[u8]| {
    // First line is the key, the rest is the text. Non-UTF-8 input is not interesting here.
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let (key, text) = input.split_once('\n').unwrap_or((input, ""));

    // Validation and both directions must agree and never panic.
    let verdict = validate(text, key);
    match encrypt(text, key) {
        Ok(cipher) => {
            assert!(verdict.is_ok());
            assert!(cipher.bytes().all(|b| b.is_ascii_uppercase()));
            let plain = decrypt(&cipher, key).expect("ciphertext of a valid pair must decrypt");
            assert_eq!(plain.text, normalize(text));
        }
        Err(err) => {
            assert_eq!(verdict, Err(err.clone()));
            assert_eq!(decrypt(text, key).map(|d| d.text), Err(err));
        }
    }
});

#[cfg(windows)]
fn main() {
    eprintln!("Fuzzing is not supported on Windows.");
    eprintln!("For fuzzing, please use Linux/Unix or WSL.");
}
