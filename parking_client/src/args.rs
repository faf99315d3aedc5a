//! Command-line arguments for the parking desk client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use parking_common::PaymentMethod;
use parking_common::net::DEFAULT_BASE_URL;
use parking_common::notice::DEFAULT_TTL_MS;

use crate::config::{BUTTON_RESET_MS, EXIT_RELOAD_MS, MUTATION_RELOAD_MS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the parking web backend.
    #[clap(long, env = "PARKING_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP request timeout in seconds.
    #[clap(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Fallback delay before a busy submit button is released.
    #[clap(long, default_value_t = BUTTON_RESET_MS)]
    pub button_reset_ms: u64,

    /// Reload delay after a swap, lot creation or ticket creation.
    #[clap(long, default_value_t = MUTATION_RELOAD_MS)]
    pub swap_reload_ms: u64,

    /// Reload delay after a processed exit.
    #[clap(long, default_value_t = EXIT_RELOAD_MS)]
    pub exit_reload_ms: u64,

    /// Lifetime of a notification before it is dismissed.
    #[clap(long, default_value_t = DEFAULT_TTL_MS)]
    pub notification_ttl_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Desk operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how many spots of a lot are free.
    Available {
        #[clap(long)]
        lot: u64,
    },
    /// List the free spots of a lot.
    Spots {
        #[clap(long)]
        lot: u64,
    },
    /// Move an open ticket to another free spot of its lot.
    Swap {
        #[clap(long)]
        ticket: u64,
        /// Lot of the ticket's current spot. Without it, `--spot` is sent after a
        /// yes/no confirmation.
        #[clap(long)]
        lot: Option<u64>,
        /// Spot currently held by the ticket, for display.
        #[clap(long)]
        current_spot: Option<String>,
        /// Target spot number; asked interactively when omitted.
        #[clap(long)]
        spot: Option<String>,
    },
    /// Show the fee a ticket would pay if it left now.
    Estimate {
        #[clap(long)]
        ticket: u64,
    },
    /// Close a ticket and record its payment.
    Exit {
        #[clap(long)]
        ticket: u64,
        /// Amount paid; defaults to the estimated fee.
        #[clap(long)]
        amount: Option<String>,
        #[clap(long, value_enum)]
        method: Option<PaymentMethod>,
        /// Send amount and method as typed, without fetching the estimate first.
        /// Both are required then; the backend still checks the fee.
        #[clap(long, requires_all = ["amount", "method"])]
        skip_estimate: bool,
    },
    /// Create a lot with the default rate card.
    CreateLot {
        #[clap(long)]
        name: String,
        #[clap(long)]
        capacity: u32,
        #[clap(long)]
        location: Option<String>,
        #[clap(long)]
        levels: Option<u32>,
    },
    /// Open a ticket and occupy its spot.
    AddTicket {
        #[clap(long)]
        plate: String,
        #[clap(long)]
        spot_id: u64,
        #[clap(long)]
        rate_id: u64,
        /// Entry time as `YYYY-MM-DD HH:MM:SS`; the backend uses now when omitted.
        #[clap(long)]
        entry_time: Option<String>,
    },
    /// Show the total a driver has paid.
    DriverSpent {
        #[clap(long)]
        driver: u64,
    },
    /// Filter the rows of a text table (one row per line) by a query.
    Search {
        #[clap(long)]
        query: String,
        /// Path to the table file.
        #[clap(long)]
        path: String,
    },
    /// Check a phone number and/or an email address.
    Validate {
        #[clap(long)]
        phone: Option<String>,
        #[clap(long)]
        email: Option<String>,
    },
}
