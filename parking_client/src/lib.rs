//! Parking desk client library: backend transport, endpoint wrappers, dialog
//! flows and the headless page model used by the `parking_client` binary.
//!
//! - `transport` — `Transport` trait and the `reqwest` implementation.
//! - `api` — `ParkingApi`, one wrapper per backend endpoint.
//! - `flows` — swap and exit dialogs as explicit session values.
//! - `page` — submit button loading state, card reveal, page reload.
//! - `console` — terminal notifier.
//! - `config` / `args` — UX timings and command-line options.
pub mod api;
pub mod args;
pub mod config;
pub mod console;
pub mod flows;
pub mod page;
pub mod transport;
