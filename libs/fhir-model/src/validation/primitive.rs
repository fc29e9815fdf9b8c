//! Lexical checks for primitive values.
//!
//! Each check returns a human-readable message on failure; the caller turns
//! it into a [`ViolationKind::InvalidPrimitive`](crate::ViolationKind).

use crate::config::ModelConfig;

pub const MAX_STRING_LENGTH: usize = 1024 * 1024;
pub const MAX_ID_LENGTH: usize = 64;

type CheckResult = Result<(), String>;

fn is_allowed_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

fn check_length(type_name: &str, value: &str) -> CheckResult {
    if value.len() > MAX_STRING_LENGTH {
        return Err(format!(
            "{} value length {} is greater than maximum allowed length {}",
            type_name,
            value.len(),
            MAX_STRING_LENGTH
        ));
    }
    Ok(())
}

pub fn check_string(value: &str, config: &ModelConfig) -> CheckResult {
    check_length("string", value)?;
    if value.chars().all(char::is_whitespace) {
        return Err("string value must contain at least one non-whitespace character".into());
    }
    for ch in value.chars() {
        if ch.is_whitespace() && !is_allowed_whitespace(ch) {
            return Err(format!(
                "string value contains disallowed whitespace character U+{:04X}",
                ch as u32
            ));
        }
        if config.check_control_chars && (ch as u32) < 0x20 && !is_allowed_whitespace(ch) {
            return Err(format!(
                "string value contains control character U+{:04X}",
                ch as u32
            ));
        }
    }
    Ok(())
}

/// Codes are strings without leading or trailing whitespace and with at most
/// single spaces between tokens.
pub fn check_code(value: &str, config: &ModelConfig) -> CheckResult {
    check_string(value, config)?;
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return Err(format!("code value '{}' has leading or trailing whitespace", value));
    }
    if value.contains("  ") || value.chars().any(|c| c.is_whitespace() && c != ' ') {
        return Err(format!(
            "code value '{}' must separate tokens with single spaces",
            value
        ));
    }
    Ok(())
}

pub fn check_id(value: &str, _config: &ModelConfig) -> CheckResult {
    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if value.is_empty() || value.len() > MAX_ID_LENGTH || !valid_chars {
        return Err(format!(
            "id value '{}' must match [A-Za-z0-9\\-\\.]{{1,64}}",
            value
        ));
    }
    Ok(())
}

pub fn check_uri(value: &str, _config: &ModelConfig) -> CheckResult {
    check_length("uri", value)?;
    if value.is_empty() {
        return Err("uri value must not be empty".into());
    }
    if value.chars().any(char::is_whitespace) {
        return Err(format!("uri value '{}' must not contain whitespace", value));
    }
    Ok(())
}

pub fn check_positive_int(value: &i32, _config: &ModelConfig) -> CheckResult {
    if *value < 1 {
        return Err(format!("positiveInt value {} must be at least 1", value));
    }
    Ok(())
}

pub fn check_unsigned_int(value: &i32, _config: &ModelConfig) -> CheckResult {
    if *value < 0 {
        return Err(format!("unsignedInt value {} must not be negative", value));
    }
    Ok(())
}

fn base64_index(ch: u8) -> Option<u8> {
    match ch {
        b'A'..=b'Z' => Some(ch - b'A'),
        b'a'..=b'z' => Some(ch - b'a' + 26),
        b'0'..=b'9' => Some(ch - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

pub fn check_base64(value: &str, _config: &ModelConfig) -> CheckResult {
    let bytes = value.as_bytes();
    if bytes.is_empty() || bytes.len() % 4 != 0 {
        return Err(format!("invalid base64 string length {}", bytes.len()));
    }
    let padding = bytes.iter().rev().take_while(|b| **b == b'=').count();
    if padding > 2 {
        return Err("base64 string has more than two padding characters".into());
    }
    let data = &bytes[..bytes.len() - padding];
    for (index, ch) in data.iter().enumerate() {
        if base64_index(*ch).is_none() {
            return Err(format!(
                "illegal base64 character '{}' at index {}",
                char::from(*ch),
                index
            ));
        }
    }
    if padding > 0 {
        let last = data.len() - 1;
        let mask = if padding == 2 { 0b00_1111 } else { 0b00_0011 };
        let bits = base64_index(data[last]).unwrap_or(0);
        if bits & mask != 0 {
            return Err(format!(
                "invalid base64 string: non-zero padding bits in character '{}' at index {}",
                char::from(data[last]),
                last
            ));
        }
    }
    Ok(())
}

/// Only checks that the narrative is not blank; XHTML schema validation is
/// out of scope.
pub fn check_xhtml(value: &str, _config: &ModelConfig) -> CheckResult {
    if value.trim().is_empty() {
        return Err("xhtml value must not be blank".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig::default()
    }

    #[test]
    fn strings_need_visible_content() {
        assert!(check_string("hello world", &config()).is_ok());
        assert!(check_string(" \t ", &config()).is_err());
        assert!(check_string("", &config()).is_err());
    }

    #[test]
    fn control_chars_follow_config() {
        let text = "bell\u{7}";
        assert!(check_string(text, &config()).is_err());
        assert!(check_string(text, &ModelConfig::lenient()).is_ok());
        assert!(check_string("line\r\nbreak\ttab", &config()).is_ok());
    }

    #[test]
    fn non_breaking_space_is_rejected() {
        assert!(check_string("a\u{a0}b", &config()).is_err());
    }

    #[test]
    fn code_spacing() {
        assert!(check_code("active", &config()).is_ok());
        assert!(check_code("two words", &config()).is_ok());
        assert!(check_code(" leading", &config()).is_err());
        assert!(check_code("trailing ", &config()).is_err());
        assert!(check_code("two  spaces", &config()).is_err());
        assert!(check_code("tab\tinside", &config()).is_err());
    }

    #[test]
    fn id_pattern() {
        assert!(check_id("example-1.a", &config()).is_ok());
        assert!(check_id(&"a".repeat(64), &config()).is_ok());
        assert!(check_id(&"a".repeat(65), &config()).is_err());
        assert!(check_id("has space", &config()).is_err());
        assert!(check_id("under_score", &config()).is_err());
        assert!(check_id("", &config()).is_err());
    }

    #[test]
    fn uri_without_whitespace() {
        assert!(check_uri("http://example.org/fhir", &config()).is_ok());
        assert!(check_uri("urn:uuid:1234", &config()).is_ok());
        assert!(check_uri("http://example.org/a b", &config()).is_err());
    }

    #[test]
    fn integer_ranges() {
        assert!(check_positive_int(&1, &config()).is_ok());
        assert!(check_positive_int(&0, &config()).is_err());
        assert!(check_unsigned_int(&0, &config()).is_ok());
        assert!(check_unsigned_int(&-1, &config()).is_err());
    }

    #[test]
    fn base64_padding_bits() {
        assert!(check_base64("aGVsbG8=", &config()).is_ok());
        assert!(check_base64("aGk=", &config()).is_ok());
        assert!(check_base64("YQ==", &config()).is_ok());
        // 'R' leaves non-zero bits in the padded position.
        assert!(check_base64("YR==", &config()).is_err());
        assert!(check_base64("aGVsbG8", &config()).is_err());
        assert!(check_base64("a=bc", &config()).is_err());
        assert!(check_base64("a===", &config()).is_err());
    }
}
