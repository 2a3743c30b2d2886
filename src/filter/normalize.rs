//! Text normalization for spam matching.
//!
//! Every comparison the filter makes, both duplicate detection and the
//! banned-word scan, happens on normalized keys rather than raw text.

/// Normalizes a word or message into its comparison key.
///
/// Lowercases the input, strips everything that is not an ASCII letter or
/// digit, then maps common look-alike characters onto the letters they
/// imitate (`0` to `o`, `1` to `l`, `3` to `e`). The result contains only
/// `[a-z0-9]` and may be empty, e.g. for text written entirely in a
/// non-Latin alphabet.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .map(substitute_lookalike)
        .collect()
}

// `@` and `!` never reach this map at runtime; the alphanumeric filter
// above has already removed them.
fn substitute_lookalike(ch: char) -> char {
    match ch {
        '0' => 'o',
        '1' => 'l',
        '@' => 'a',
        '3' => 'e',
        '!' => 'i',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "helloworld");
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(normalize("SPAM"), normalize("spam"));
    }

    #[test]
    fn substitutes_lookalike_digits() {
        assert_eq!(normalize("v0uch3r"), "voucher");
        assert_eq!(normalize("1oans"), "loans");
        assert_eq!(normalize("spamword1"), "spamwordl");
    }

    #[test]
    fn keeps_unsubstituted_digits() {
        assert_eq!(normalize("room 42"), "room42");
        assert_eq!(normalize("spamword2"), "spamword2");
    }

    #[test]
    fn strips_non_ascii_alphabets_entirely() {
        assert_eq!(normalize("Привет"), "");
        assert_eq!(normalize("спам spam спам"), "spam");
    }

    #[test]
    fn is_idempotent() {
        for input in ["Fr33 M0N3Y!!!", "Привет", "sp4m", "passw0rd", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }
}
