//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static OTP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());
static OBJECT_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

/// Length of the one-time codes sent for email verification and password reset
pub const OTP_LENGTH: usize = 6;

/// Check if a string is not empty after trimming
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a value is a six-digit one-time code
pub fn is_otp_code(value: &str) -> bool {
    OTP_REGEX.is_match(value)
}

/// Check if a value looks like a backend document id (24 hex characters)
pub fn is_object_id(value: &str) -> bool {
    OBJECT_ID_REGEX.is_match(value)
}

/// Mask an email address for logging, keeping the first character and the domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_otp_code() {
        assert!(is_otp_code("123456"));
        assert!(!is_otp_code("12345"));
        assert!(!is_otp_code("1234567"));
        assert!(!is_otp_code("12a456"));
    }

    #[test]
    fn test_is_object_id() {
        assert!(is_object_id("65f1c2a9e4b0a1b2c3d4e5f6"));
        assert!(!is_object_id("65f1c2a9"));
        assert!(!is_object_id("zzf1c2a9e4b0a1b2c3d4e5f6"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("broken"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank(" x "));
        assert!(!not_blank("   "));
    }
}
