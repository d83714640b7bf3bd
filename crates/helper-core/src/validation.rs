//! Field-level validation rules shared by record construction and the
//! interactive prompts.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CoreError, Result};

/// Languages offered during interactive registration.
///
/// Records loaded from disk are not restricted to this list.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "english",
    "spanish",
    "turkish",
    "korean",
    "chinese",
    "vietnamese",
    "farsi",
    "french",
    "german",
    "japanese",
    "arabic",
    "hindi",
    "russian",
    "portuguese",
];

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("regex is valid")
    })
}

/// Returns `true` when `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Returns `true` when `value` is non-empty and made only of alphabetic
/// characters separated by whitespace.
pub fn is_alpha_words(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.split_whitespace().all(|w| w.chars().all(char::is_alphabetic))
}

/// Returns `true` when `language` (any case) is in [`SUPPORTED_LANGUAGES`].
pub fn is_supported_language(language: &str) -> bool {
    let lower = normalize_key(language);
    SUPPORTED_LANGUAGES.contains(&lower.as_str())
}

/// Lowercase a lookup key (location, category, language, email) and collapse
/// runs of whitespace to single spaces.
pub fn normalize_key(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Validate and normalize an email address.
pub fn validate_email(field: &str, email: &str) -> Result<String> {
    let normalized = normalize_key(email);
    if !is_valid_email(&normalized) {
        return Err(CoreError::validation(
            field,
            format!("'{}' is not a valid email address", email.trim()),
        ));
    }
    Ok(normalized)
}

/// Validate a person's name: letters and spaces, at least two characters.
pub fn validate_person_name(field: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if !is_alpha_words(trimmed) || trimmed.chars().count() < 2 {
        return Err(CoreError::validation(
            field,
            format!("'{}' must contain only letters and spaces", trimmed),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a place or category key: letters and spaces only. Returns the
/// normalized key (see [`normalize_key`]).
pub fn validate_key(field: &str, value: &str) -> Result<String> {
    if !is_alpha_words(value) {
        return Err(CoreError::validation(
            field,
            format!("'{}' must contain only letters and spaces", value.trim()),
        ));
    }
    Ok(normalize_key(value))
}

/// Reject empty or whitespace-only text. Returns the trimmed text.
pub fn validate_non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, "value cannot be empty"));
    }
    Ok(trimmed.to_string())
}
