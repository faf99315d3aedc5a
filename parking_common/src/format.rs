//! Display helpers for amounts and timestamps, fixed to the Indian locale.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ParkingError;
use crate::result::Result;

/// Currency symbol used for every amount shown to the operator.
pub const RUPEE: &str = "₹";

const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Formats an amount as Indian rupees with two decimals, e.g. `₹12,34,567.00`.
///
/// Digits are grouped the Indian way: the last three, then pairs.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{}NaN", RUPEE);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}∞", sign, RUPEE);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, RUPEE, group_indian(whole), fraction)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Renders a backend timestamp as `19 Oct 2026, 02:30 pm`.
///
/// Accepts RFC 3339 (rendered in its own offset), naive ISO-8601 with `T` or a
/// space separator, and bare dates (midnight).
pub fn format_date_time(input: &str) -> Result<String> {
    let naive = parse_timestamp(input.trim())
        .ok_or_else(|| ParkingError::Format(format!("Invalid date: {}", input)))?;
    Ok(naive.format("%-d %b %Y, %I:%M %P").to_string())
}

fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Some(with_offset.naive_local());
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_rupee_and_two_decimals() {
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency(45.0), "₹45.00");
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(999.999), "₹1,000.00");
    }

    #[test]
    fn currency_groups_lakhs_and_crores() {
        assert_eq!(format_currency(1234567.0), "₹12,34,567.00");
        assert_eq!(format_currency(123456789.25), "₹12,34,56,789.25");
        assert_eq!(format_currency(-1500.0), "-₹1,500.00");
    }

    #[test]
    fn date_time_short_form() {
        assert_eq!(format_date_time("2026-10-19T14:30:00").unwrap(), "19 Oct 2026, 02:30 pm");
        assert_eq!(format_date_time("2026-01-05 09:05:59").unwrap(), "5 Jan 2026, 09:05 am");
        assert_eq!(format_date_time("2026-03-01T00:15:00+05:30").unwrap(), "1 Mar 2026, 12:15 am");
        assert_eq!(format_date_time("2026-03-01").unwrap(), "1 Mar 2026, 12:00 am");
    }

    #[test]
    fn date_time_rejects_garbage() {
        assert!(format_date_time("yesterday").is_err());
        assert!(format_date_time("").is_err());
    }
}
