//! Code generation and comparison.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

/// Draws `length` independent digits, each uniform over 0-9, from the OS CSPRNG.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Exact equality that does not leak the position of the first mismatch.
pub fn codes_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len() && constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_width_and_alphabet() {
        for length in [1, 4, 6, 8, 32] {
            let code = generate_code(length);
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_code_covers_all_digits() {
        // 2000 draws; missing a digit has probability ~10 * 0.9^2000
        let seen: std::collections::HashSet<char> = generate_code(2000).chars().collect();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_codes_match_exact_only() {
        assert!(codes_match("012345", "012345"));
        assert!(!codes_match("012345", "12345"));
        assert!(!codes_match("012345", "0123456"));
        assert!(!codes_match("012345", "012346"));
        assert!(!codes_match("012345", ""));
    }
}
