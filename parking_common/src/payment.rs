//! Payment methods accepted by the exit desk.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Set of payment methods the backend records for a ticket exit.
///
/// The display form is the exact value the backend stores, e.g. `Credit Card`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum PaymentMethod {
    /// Cash at the booth. Used when nothing else is selected.
    #[default]
    Cash,
    /// Card payment.
    #[serde(rename = "Credit Card")]
    #[strum(to_string = "Credit Card", serialize = "CreditCard", serialize = "credit-card")]
    CreditCard,
    /// Unified Payments Interface transfer.
    #[serde(rename = "UPI")]
    #[strum(to_string = "UPI")]
    Upi,
    /// In-app wallet balance.
    AppWallet,
}

#[cfg(test)]
mod tests {
    use super::PaymentMethod;

    #[test]
    fn parses_backend_spellings() {
        assert_eq!("Cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("credit card".parse::<PaymentMethod>().unwrap(), PaymentMethod::CreditCard);
        assert_eq!("upi".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!("AppWallet".parse::<PaymentMethod>().unwrap(), PaymentMethod::AppWallet);
        assert!("Cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn serializes_to_backend_values() {
        assert_eq!(serde_json::to_string(&PaymentMethod::CreditCard).unwrap(), "\"Credit Card\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"UPI\"");
        assert_eq!(PaymentMethod::CreditCard.to_string(), "Credit Card");
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }
}
