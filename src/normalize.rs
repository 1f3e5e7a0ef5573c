/// Uppercase `text` and keep only `A`-`Z`.
///
/// Uses full Unicode case mapping before filtering, so `ß` contributes `SS` while `Ñ`,
/// digits, punctuation and whitespace are dropped. Never fails; the result may be empty.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_uppercase)
        .filter(char::is_ascii_uppercase)
        .collect()
}
