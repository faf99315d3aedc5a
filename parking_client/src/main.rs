//! Parking Client — a terminal front desk for the parking management backend.
//! It talks to the backend's JSON endpoints to list free spots, swap a ticket to
//! another spot, estimate and settle an exit, and create lots and tickets. Every
//! outcome is reported as a notification; operator input is validated before
//! anything is sent.
//!
//! Usage example (CLI):
//! ```bash
//! parking_client --base-url http://127.0.0.1:5000 swap --ticket 12 --lot 1
//! parking_client exit --ticket 12 --method upi
//! ```
//!
//! The `search` subcommand filters a text table (one row per line) the same way
//! the desk page filters its tables. See `parking_common::search`.
#![warn(missing_docs)]
use clap::Parser;
use log::{debug, info};
use parking_common::format::{format_currency, format_date_time};
use parking_common::search::{EMPTY_STATE_HINT, EMPTY_STATE_TITLE, RowSource, SearchView};
use parking_common::validate::{validate_email, validate_phone_number};
use parking_common::ParkingError;
use parking_common::Result;
use parking_client::api::ParkingApi;
use parking_client::args::{Args, Command};
use parking_client::config::UiTimings;
use parking_client::console::ConsoleNotifier;
use parking_client::flows;
use parking_client::page::{ConsoleReload, FormLoading, SubmitButton};
use parking_client::transport::HttpTransport;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;

type Desk = ParkingApi<HttpTransport, ConsoleNotifier, ConsoleReload>;

fn main() -> Result<(), ParkingError> {
    init_logger();
    let args = Args::parse();
    let timings = UiTimings::from(&args);

    match &args.command {
        Command::Search { query, path } => return search(query, path),
        Command::Validate { phone, email } => return validate(phone.as_deref(), email.as_deref()),
        _ => {}
    }

    let transport = HttpTransport::new(&args.base_url, Duration::from_secs(args.timeout_secs))?;
    info!("Using backend at {}", args.base_url);
    let desk: Desk = ParkingApi::new(
        transport,
        ConsoleNotifier::new(timings.notification_ttl),
        ConsoleReload,
        timings,
    );

    match args.command {
        Command::Available { lot } => {
            let available = desk.get_available_spots(lot)?;
            println!("Lot {}: {} spot(s) available", lot, available);
        }
        Command::Spots { lot } => {
            let spots = desk.available_spots_list(lot)?;
            if spots.is_empty() {
                println!("No available spots in this lot");
            }
            for spot in spots {
                println!("{}\t(ID {})", spot.spot_number, spot.spot_id);
            }
        }
        Command::Swap {
            ticket,
            lot: None,
            spot: Some(spot),
            ..
        } => {
            flows::prompt_swap_spot(&desk, ticket, Some(&spot), confirm)?;
        }
        Command::Swap {
            ticket,
            lot,
            current_spot,
            spot,
        } => {
            let modal = flows::open_swap_modal(&desk, ticket, lot, current_spot.as_deref())?;
            for entry in modal.entries() {
                println!("  {}", entry);
            }
            let selection = match spot {
                Some(spot) => Some(spot),
                None if modal.has_choices() => ask("Spot number: ")?,
                None => None,
            };
            submit_form("Swap", &timings, || modal.confirm(&desk, selection.as_deref()))?;
        }
        Command::Estimate { ticket } => {
            let estimate = desk.estimate_exit(ticket)?;
            print_estimate(&estimate);
        }
        Command::Exit {
            ticket,
            amount,
            method,
            skip_estimate: true,
        } => {
            let method = method.map(|m| m.to_string());
            submit_form("Process exit", &timings, || {
                flows::prompt_process_exit(&desk, ticket, amount.as_deref(), method.as_deref())
            })?;
        }
        Command::Exit {
            ticket,
            amount,
            method,
            ..
        } => {
            let modal = flows::open_exit_modal(&desk, ticket)?;
            print_estimate(&modal.estimate);
            let amount = amount.unwrap_or_else(|| modal.prefilled_amount());
            let receipt = submit_form("Process exit", &timings, || {
                modal.confirm(&desk, &amount, method)
            })?;
            if let (Some(id), Some(status)) = (receipt.ticket_id, receipt.payment_status) {
                println!("Ticket #{} is now {}", id, status);
            }
        }
        Command::CreateLot {
            name,
            capacity,
            location,
            levels,
        } => {
            submit_form("Create lot", &timings, || {
                desk.create_lot_with_defaults(&name, capacity, location.as_deref(), levels)
            })?;
        }
        Command::AddTicket {
            plate,
            spot_id,
            rate_id,
            entry_time,
        } => {
            submit_form("Add ticket", &timings, || {
                desk.add_ticket_and_occupy(&plate, spot_id, rate_id, entry_time.as_deref())
            })?;
        }
        Command::DriverSpent { driver } => {
            let total = desk.driver_total_spent(driver)?;
            println!("Driver #{} spent {}", driver, format_currency(total));
        }
        Command::Search { .. } | Command::Validate { .. } => {}
    }

    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Runs `action` while the form's submit button is in its loading state.
fn submit_form<T>(label: &str, timings: &UiTimings, action: impl FnOnce() -> Result<T>) -> Result<T> {
    let mut form = FormLoading::new(SubmitButton::new(label), timings.button_reset);
    if form.submit()? {
        debug!("{} -> {}", label, form.button()?.label);
    }
    let outcome = action();
    form.finish();
    outcome
}

fn print_estimate(estimate: &parking_common::model::ExitEstimate) {
    if let Some(entry) = estimate.entry_time.as_deref() {
        match format_date_time(entry) {
            Ok(entered) => println!("Entered:      {}", entered),
            Err(e) => debug!("Unreadable entry time {}: {}", entry, e),
        }
    }
    println!(
        "Billed hours: {} ({:.2} h parked) at {}/h",
        estimate.billed_hours,
        estimate.estimated_hours,
        format_currency(estimate.rate_per_hour)
    );
    println!("Total due:    {}", format_currency(estimate.estimated_total));
}

fn search(query: &str, raw_path: &str) -> Result<(), ParkingError> {
    let path = normalize_path(raw_path);
    if !is_file_exist(&path) {
        return Err(ParkingError::Format(format!("No such table file: {}", path.display())));
    }
    let rows = Vec::<String>::read_rows(BufReader::new(File::open(&path)?))?;
    let mut view = SearchView::new(rows);
    let outcome = view.on_input(query);
    info!("{} row(s) match {:?}", outcome.visible_count, query);

    if view.empty_state_visible() {
        println!("{}", EMPTY_STATE_TITLE);
        println!("{}", EMPTY_STATE_HINT);
    } else {
        for row in view.visible_rows() {
            println!("{}", row);
        }
    }
    Ok(())
}

fn validate(phone: Option<&str>, email: Option<&str>) -> Result<(), ParkingError> {
    let mut valid = true;
    if let Some(phone) = phone {
        let ok = validate_phone_number(phone);
        println!("phone {}: {}", phone, if ok { "valid" } else { "invalid" });
        valid &= ok;
    }
    if let Some(email) = email {
        let ok = validate_email(email);
        println!("email {}: {}", email, if ok { "valid" } else { "invalid" });
        valid &= ok;
    }
    if valid {
        Ok(())
    } else {
        Err(ParkingError::Validation("Invalid contact details".to_string()))
    }
}

/// Reads one trimmed line from stdin; `None` on end of input or a blank line.
fn ask(question: &str) -> Result<Option<String>> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Asks a yes/no question on stdin; anything but `y`/`yes` declines.
fn confirm(question: &str) -> bool {
    match ask(&format!("{} [y/N] ", question)) {
        Ok(Some(answer)) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
