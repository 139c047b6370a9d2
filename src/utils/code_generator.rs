//! Short code generation and validation utilities.
//!
//! Provides uniformly-distributed random code generation over the 62-symbol
//! alphanumeric alphabet and validation for custom user-provided codes.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Length of generated codes.
const GENERATED_CODE_LENGTH: usize = 6;

/// Pattern every code must match, generated or custom.
///
/// Also used by the redirect path to reject malformed codes before any
/// storage round-trip.
pub static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Generates a random short code of the requested length.
///
/// Each character is drawn uniformly from `[A-Za-z0-9]` using the thread-local
/// RNG. Uniqueness is not guaranteed here; the caller checks against storage
/// and the database constraint is the final arbiter.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generates a code at the default length used by the allocator.
pub fn generate_default_code() -> String {
    generate_code(GENERATED_CODE_LENGTH)
}

/// Returns true if `code` is a well-formed short code.
pub fn is_valid_code(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 6-8 characters
/// - Allowed characters: ASCII letters and digits
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code does not match the pattern.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Code must be 6-8 alphanumeric characters",
        ));
    }

    Ok(())
}
