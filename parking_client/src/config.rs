//! UX timings of the desk client.
//!
//! All delays are heuristics, not protocol guarantees, so each one can be
//! overridden from the command line (see `args`).
use std::time::Duration;

use parking_common::notice::DEFAULT_TTL_MS;

use crate::args::Args;

/// Delay before a submit button is re-enabled if nothing else restores it.
pub const BUTTON_RESET_MS: u64 = 5000;
/// Delay before reloading after a swap, lot creation or ticket creation.
pub const MUTATION_RELOAD_MS: u64 = 700;
/// Delay before reloading after a processed exit.
pub const EXIT_RELOAD_MS: u64 = 800;

/// Timings shared by the API wrappers and the page model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    pub button_reset: Duration,
    pub mutation_reload: Duration,
    pub exit_reload: Duration,
    /// How long a notification stays on screen.
    pub notification_ttl: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            button_reset: Duration::from_millis(BUTTON_RESET_MS),
            mutation_reload: Duration::from_millis(MUTATION_RELOAD_MS),
            exit_reload: Duration::from_millis(EXIT_RELOAD_MS),
            notification_ttl: Duration::from_millis(DEFAULT_TTL_MS),
        }
    }
}

impl From<&Args> for UiTimings {
    fn from(args: &Args) -> Self {
        Self {
            button_reset: Duration::from_millis(args.button_reset_ms),
            mutation_reload: Duration::from_millis(args.swap_reload_ms),
            exit_reload: Duration::from_millis(args.exit_reload_ms),
            notification_ttl: Duration::from_millis(args.notification_ttl_ms),
        }
    }
}
