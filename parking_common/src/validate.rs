//! Input checks run before anything is sent to the backend.
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParkingError;
use crate::result::Result;

/// Largest accepted difference between the amount paid and the fee due.
pub const AMOUNT_TOLERANCE: f64 = 0.01;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Returns `true` for exactly ten ASCII digits.
pub fn validate_phone_number(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Permissive email shape check: one `@`, no whitespace, a dot after the `@`.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Parses a payment amount typed by the operator.
///
/// Surrounding whitespace is ignored. Anything that is not a finite,
/// non-negative decimal number is rejected with `ParkingError::Validation`.
pub fn parse_amount(input: &str) -> Result<f64> {
    let amount = input
        .trim()
        .parse::<f64>()
        .map_err(|_| ParkingError::Validation("Invalid amount".to_string()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ParkingError::Validation("Invalid amount".to_string()));
    }
    Ok(amount)
}

/// Whether `entered` settles a fee of `required` within [`AMOUNT_TOLERANCE`].
pub fn amount_matches(entered: f64, required: f64) -> bool {
    (entered - required).abs() <= AMOUNT_TOLERANCE
}
