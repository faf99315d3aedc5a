//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `ParkingError`, so functions can simply return `Result<T>`.
use crate::error::ParkingError;

/// Workspace-wide `Result` alias with `ParkingError` as the default error.
pub type Result<T, E = ParkingError> = std::result::Result<T, E>;
