//! Turkish national identity number (T.C. Kimlik No).

use crate::format::PLACEHOLDER;

/// Checks an 11-digit national identity number.
///
/// With digits `d[0..11]`:
///
/// - `d[9]  == (7 * (d0 + d2 + d4 + d6 + d8) - (d1 + d3 + d5 + d7)) mod 10`
/// - `d[10] == (d0 + d1 + ... + d9) mod 10`
///
/// Anything that is not exactly eleven ASCII digits is invalid. No trimming
/// is applied.
///
/// # Examples
///
/// ```
/// use reg_normalization::validate_national_id;
///
/// assert!(validate_national_id("10000000146"));
/// assert!(!validate_national_id("12345678901"));
/// assert!(!validate_national_id("1000000014"));
/// ```
pub fn validate_national_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != 11 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let digits: Vec<i32> = bytes.iter().map(|b| i32::from(b - b'0')).collect();

    let odd_sum: i32 = digits[..9].iter().step_by(2).sum();
    let even_sum: i32 = digits[1..8].iter().step_by(2).sum();
    let tenth = (odd_sum * 7 - even_sum).rem_euclid(10);
    let eleventh = digits[..10].iter().sum::<i32>() % 10;

    digits[9] == tenth && digits[10] == eleventh
}

/// Masks an identity number for display, keeping the last four characters.
///
/// Blank input gives the placeholder, input of four characters or fewer is
/// fully masked.
pub fn mask_national_id(id: &str) -> String {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let hidden = chars.len() - 4;
    let mut masked = "*".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert!(validate_national_id("10000000146"));
        assert!(!validate_national_id("12345678901"));
        assert!(!validate_national_id("10000000147"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!validate_national_id(""));
        assert!(!validate_national_id(" 10000000146"));
        assert!(!validate_national_id("1000000014a"));
        assert!(!validate_national_id("100000001460"));
        assert!(!validate_national_id("１0000000146"));
    }

    #[test]
    fn test_negative_intermediate_wraps() {
        // odd digits sum to 0, even digits to 9: (0 - 9) mod 10 == 1
        assert!(validate_national_id("00090000010"));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask_national_id("10000000146"), "*******0146");
        assert_eq!(mask_national_id("123"), "****");
        assert_eq!(mask_national_id("  "), "—");
    }
}
