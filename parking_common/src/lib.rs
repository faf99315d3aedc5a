//!
//! Common types and utilities shared by the parking desk crates.
//!
//! This crate aggregates:
//! - `error` — unified error type `ParkingError` used across the workspace.
//! - `result` — handy `Result<T, ParkingError>` alias.
//! - `net` — backend endpoint paths and URL helpers.
//! - `model` — JSON request/response payloads of the backend.
//! - `payment` — payment methods accepted at exit.
//! - `notice` — notifications, the `Notifier` trait and the auto-dismissing tray.
//! - `validate` — phone, email and payment amount checks.
//! - `format` — rupee and date/time rendering.
//! - `search` — case-insensitive table filtering.
#![warn(missing_docs)]
pub mod error;
pub mod format;
pub mod model;
pub mod net;
pub mod notice;
pub mod payment;
pub mod result;
pub mod search;
pub mod validate;

pub use error::ParkingError;
pub use notice::{Notification, Notifier, Severity};
pub use payment::PaymentMethod;
pub use result::Result;
