//! Resident identity card number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// 18-character identity number: region code, birth date (1800-2099),
/// sequence number and a check character that may be `X`.
pub static ID_CARD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9]\d{5}(18|19|20)\d{2}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])\d{3}[0-9Xx]$")
        .expect("id card pattern is valid")
});

/// Check if a string has the shape of an 18-character identity number
pub fn is_valid_id_card(value: &str) -> bool {
    ID_CARD_REGEX.is_match(value)
}

/// Mask an identity number for logging, keeping the region code and the last
/// four characters
pub fn mask_id_card(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() == 18 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[14..].iter().collect();
        format!("{}********{}", head, tail)
    } else {
        "********".to_string()
    }
}
