//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Mainland China mobile number: 11 digits starting with 1[3-9]
pub static MOBILE_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{9}$").expect("mobile phone pattern is valid")
});

/// Check if a phone number is a valid mainland mobile number
pub fn is_valid_mobile_phone(phone: &str) -> bool {
    MOBILE_PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for display and logging (e.g., 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().collect();
    if digits.len() >= 7 {
        let head: String = digits[..3].iter().collect();
        let tail: String = digits[digits.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}
