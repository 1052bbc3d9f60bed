//! Field-level validation rules and input sanitizers.
//!
//! These are the single source of truth for per-field constraints: the
//! wizard applies them while the user types (sanitizers, live word
//! counts) and the submission endpoint applies them again
//! authoritatively before anything is recorded. Every validator returns
//! the first violated rule as a [`CoreError::Validation`] with a
//! user-facing message, so the caller can surface it inline next to the
//! offending field.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of words in free-text fields (motivation, message).
pub const MESSAGE_MAX_WORDS: usize = 200;

/// Character safety ceiling for free-text fields, independent of the
/// word cap.
pub const MESSAGE_MAX_CHARS: usize = 2000;

/// Maximum length of a person name after sanitizing.
pub const NAME_MAX_CHARS: usize = 80;

/// Maximum length of a postal code after sanitizing.
pub const POSTAL_CODE_MAX_CHARS: usize = 10;

/// Maximum length of the free-text languages field.
pub const LANGUAGES_MAX_CHARS: usize = 120;

/// Maximum length of a social profile link.
pub const LINK_MAX_CHARS: usize = 200;

/// Minimum number of digits for a phone number to be plausible.
pub const PHONE_MIN_DIGITS: usize = 7;

/// Maximum length of a phone number string.
pub const PHONE_MAX_CHARS: usize = 20;

/// Postal code shape: alphanumeric with optional inner spaces/hyphens.
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9][A-Z0-9 -]{0,9}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Word counting
// ---------------------------------------------------------------------------

/// Count words by splitting trimmed text on whitespace.
///
/// This is the count shown live in the wizard and enforced at submit
/// time; both sides call this one function so the numbers always agree.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Require a non-empty value after trimming.
pub fn validate_required(label: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    Ok(())
}

/// Require a syntactically valid email address.
pub fn validate_email(value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Email is required".to_string()));
    }
    if !trimmed.validate_email() {
        return Err(CoreError::Validation("Invalid email".to_string()));
    }
    Ok(())
}

/// Require a plausible phone number: at least [`PHONE_MIN_DIGITS`]
/// digits, only dialing characters, and not absurdly long.
///
/// This is deliberately not full E.164 verification; the wizard collects
/// the number through an international-phone control and the weakest
/// useful guarantee is "long enough to dial".
pub fn validate_phone(value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Phone number is required".to_string()));
    }
    if trimmed.chars().count() > PHONE_MAX_CHARS {
        return Err(CoreError::Validation("Phone number is too long".to_string()));
    }
    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if !valid_chars {
        return Err(CoreError::Validation(
            "Phone number contains invalid characters".to_string(),
        ));
    }
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if digits < PHONE_MIN_DIGITS {
        return Err(CoreError::Validation(
            "Phone number looks too short".to_string(),
        ));
    }
    Ok(())
}

/// Require a free-text field to stay inside both the character ceiling
/// and the word cap. `label` names the field in the error message.
pub fn validate_free_text(label: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MESSAGE_MAX_CHARS {
        return Err(CoreError::Validation(format!(
            "{label} is longer than {MESSAGE_MAX_CHARS} characters"
        )));
    }
    let words = word_count(value);
    if words > MESSAGE_MAX_WORDS {
        return Err(CoreError::Validation(format!(
            "{label} exceeds the {MESSAGE_MAX_WORDS}-word limit ({words} words)"
        )));
    }
    Ok(())
}

/// Validate a postal code against the published shape.
pub fn validate_postal_code(value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Postal code is required".to_string()));
    }
    if !POSTAL_CODE_RE.is_match(trimmed) {
        return Err(CoreError::Validation("Invalid postal code".to_string()));
    }
    Ok(())
}

/// Validate an optional http(s) link. Empty input is accepted.
pub fn validate_link(label: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.chars().count() > LINK_MAX_CHARS {
        return Err(CoreError::Validation(format!("{label} is too long")));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(CoreError::Validation(format!(
            "{label} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a value to stay within `max` characters.
pub fn validate_max_chars(label: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{label} is longer than {max} characters"
        )));
    }
    Ok(())
}

/// Require membership in a published option list (select-style fields).
pub fn validate_membership(
    label: &str,
    value: &str,
    options: &[&str],
) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    if !options.contains(&trimmed) {
        return Err(CoreError::Validation(format!(
            "Invalid {label} '{trimmed}'. Must be one of: {}",
            options.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sanitizers (applied on input, before validation)
// ---------------------------------------------------------------------------

/// Strip characters outside letters/spaces/hyphens/apostrophes and cap
/// the length. Applied to name fields on every keystroke.
pub fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\''))
        .take(NAME_MAX_CHARS)
        .collect()
}

/// Strip non-alphanumerics (keeping space/hyphen), upper-case, and cap
/// the length. Applied to postal code fields on every keystroke.
pub fn sanitize_postal_code(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .take(POSTAL_CODE_MAX_CHARS)
        .collect()
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn clamp_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

/// First whitespace-separated token of a full name, for greeting lines.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("there")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- word_count --

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count("  padded   out\ttabs\nnewlines  "), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn word_count_is_stable_across_calls() {
        let text = "the same text counted twice";
        assert_eq!(word_count(text), word_count(text));
    }

    // -- validate_free_text --

    #[test]
    fn free_text_at_word_limit_is_accepted() {
        let text = vec!["word"; MESSAGE_MAX_WORDS].join(" ");
        assert!(validate_free_text("Motivation", &text).is_ok());
    }

    #[test]
    fn free_text_one_word_over_limit_is_rejected() {
        let text = vec!["word"; MESSAGE_MAX_WORDS + 1].join(" ");
        let err = validate_free_text("Motivation", &text).unwrap_err();
        assert!(err.to_string().contains("200-word limit"));
    }

    #[test]
    fn free_text_char_ceiling_is_independent_of_words() {
        // One giant "word" never trips the word cap but must trip the
        // character ceiling.
        let text = "x".repeat(MESSAGE_MAX_CHARS + 1);
        let err = validate_free_text("Message", &text).unwrap_err();
        assert!(err.to_string().contains("characters"));
    }

    // -- validate_email --

    #[test]
    fn email_accepts_plain_addresses() {
        assert!(validate_email("aye@example.com").is_ok());
        assert!(validate_email("  spaced@example.com  ").is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        let err = validate_email("not-an-email").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Invalid email");
        assert!(validate_email("missing@tld@double.com").is_err());
    }

    #[test]
    fn email_empty_reports_required() {
        let err = validate_email("   ").unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    // -- validate_phone --

    #[test]
    fn phone_accepts_international_numbers() {
        assert!(validate_phone("+959123456").is_ok());
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("(01) 234-5678").is_ok());
    }

    #[test]
    fn phone_rejects_short_numbers() {
        let err = validate_phone("+9591").unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn phone_rejects_letters() {
        assert!(validate_phone("+95 CALL ME").is_err());
    }

    // -- validate_postal_code --

    #[test]
    fn postal_code_accepts_common_shapes() {
        assert!(validate_postal_code("YGN-11").is_ok());
        assert!(validate_postal_code("11181").is_ok());
        assert!(validate_postal_code("SW1A 1AA").is_ok());
        // Sanitizing upper-cases, but the server does not rely on it.
        assert!(validate_postal_code("sw1a 1aa").is_ok());
    }

    #[test]
    fn postal_code_rejects_symbols_and_overlength() {
        assert!(validate_postal_code("YGN_11").is_err());
        assert!(validate_postal_code("ABCDE12345X").is_err());
        assert!(validate_postal_code("").is_err());
    }

    // -- validate_link --

    #[test]
    fn link_is_optional() {
        assert!(validate_link("Profile link", "").is_ok());
        assert!(validate_link("Profile link", "   ").is_ok());
    }

    #[test]
    fn link_requires_http_scheme() {
        assert!(validate_link("Profile link", "https://example.com/me").is_ok());
        assert!(validate_link("Profile link", "ftp://example.com").is_err());
        assert!(validate_link("Profile link", "example.com/me").is_err());
    }

    // -- validate_max_chars --

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        assert!(validate_max_chars("Languages", "éé", 2).is_ok());
        assert!(validate_max_chars("Languages", "ééé", 2).is_err());
    }

    // -- validate_membership --

    #[test]
    fn membership_accepts_listed_values() {
        assert!(validate_membership("destination", "UK", &["UK", "USA"]).is_ok());
    }

    #[test]
    fn membership_rejects_unlisted_values_with_options() {
        let err = validate_membership("destination", "Mars", &["UK", "USA"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Mars"));
        assert!(message.contains("UK, USA"));
    }

    // -- sanitizers --

    #[test]
    fn sanitize_name_keeps_letters_spaces_hyphens_apostrophes() {
        assert_eq!(sanitize_name("Aye-Aye O'Neil 3rd!"), "Aye-Aye O'Neil rd");
        assert_eq!(sanitize_name("Mya<script>"), "Myascript");
    }

    #[test]
    fn sanitize_name_keeps_non_ascii_letters() {
        assert_eq!(sanitize_name("Zoé Müller"), "Zoé Müller");
    }

    #[test]
    fn sanitize_name_caps_length() {
        let long = "a".repeat(NAME_MAX_CHARS + 20);
        assert_eq!(sanitize_name(&long).chars().count(), NAME_MAX_CHARS);
    }

    #[test]
    fn sanitize_postal_code_strips_and_uppercases() {
        assert_eq!(sanitize_postal_code("ygn#11!"), "YGN11");
        assert_eq!(sanitize_postal_code("sw1a 1aa"), "SW1A 1AA");
    }

    #[test]
    fn sanitize_postal_code_caps_length() {
        assert_eq!(sanitize_postal_code("123456789012345").len(), POSTAL_CODE_MAX_CHARS);
    }

    #[test]
    fn clamp_chars_respects_boundaries() {
        assert_eq!(clamp_chars("hello", 3), "hel");
        assert_eq!(clamp_chars("héllo", 2), "hé");
        assert_eq!(clamp_chars("ok", 10), "ok");
    }

    // -- first_name --

    #[test]
    fn first_name_takes_leading_token() {
        assert_eq!(first_name("Aye Aye"), "Aye");
        assert_eq!(first_name("  Mya  "), "Mya");
        assert_eq!(first_name(""), "there");
    }
}
