//! Two-step dialogs: open with server data, confirm with operator input.
//!
//! Opening a dialog returns a session value (`SwapModal`, `ExitModal`) that carries
//! the ticket and whatever the confirmation step needs. Confirming consumes that
//! value, validates the input locally and only then calls the backend. Rejected
//! input produces a `warning` notification and no request.
use log::{debug, warn};
use parking_common::format::format_currency;
use parking_common::model::{ExitEstimate, ExitReceipt, Spot};
use parking_common::validate::{amount_matches, parse_amount};
use parking_common::{Notifier, ParkingError, PaymentMethod, Result, Severity};

use crate::api::ParkingApi;
use crate::page::Reload;
use crate::transport::Transport;

/// Text of the disabled placeholder entry of the spot selector.
pub const SELECT_PLACEHOLDER: &str = "Select spot...";
/// Text of the disabled entry shown when a lot has no free spot.
pub const NO_SPOTS_ENTRY: &str = "No available spots in this lot";

/// One selectable spot in the swap dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotChoice {
    /// Value submitted on confirm: the spot number.
    pub value: String,
    /// Text shown to the operator, e.g. `A12 (ID 7)`.
    pub label: String,
}

impl From<Spot> for SpotChoice {
    fn from(spot: Spot) -> Self {
        Self {
            label: format!("{} (ID {})", spot.spot_number, spot.spot_id),
            value: spot.spot_number,
        }
    }
}

/// Open swap dialog for one ticket.
#[derive(Debug, Clone)]
pub struct SwapModal {
    pub ticket_id: u64,
    pub lot_id: u64,
    pub current_spot: Option<String>,
    pub choices: Vec<SpotChoice>,
}

impl SwapModal {
    /// Whether the selector has anything besides the disabled placeholder.
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Lines of the selector as rendered, placeholder first.
    pub fn entries(&self) -> Vec<&str> {
        let mut entries = vec![SELECT_PLACEHOLDER];
        if self.choices.is_empty() {
            entries.push(NO_SPOTS_ENTRY);
        } else {
            entries.extend(self.choices.iter().map(|choice| choice.label.as_str()));
        }
        entries
    }

    /// Swaps the ticket to `selection`.
    ///
    /// A missing or blank selection, or one that is not among the offered spots,
    /// is rejected locally.
    pub fn confirm<T: Transport, N: Notifier, R: Reload>(
        self,
        api: &ParkingApi<T, N, R>,
        selection: Option<&str>,
    ) -> Result<()> {
        let selected = selection.map(str::trim).unwrap_or_default();
        let offered = self.choices.iter().any(|choice| choice.value == selected);
        if selected.is_empty() || !offered {
            return Err(reject(api.notifier(), "Please select a spot".to_string()));
        }
        api.swap_spot(self.ticket_id, selected)
    }
}

/// Open exit dialog for one ticket.
#[derive(Debug, Clone)]
pub struct ExitModal {
    pub ticket_id: u64,
    /// Fee the payment has to match.
    pub required_amount: f64,
    pub estimate: ExitEstimate,
}

impl ExitModal {
    /// Value pre-filled in the amount field.
    pub fn prefilled_amount(&self) -> String {
        self.required_amount.to_string()
    }

    /// The required fee as shown in the dialog.
    pub fn estimated_total_display(&self) -> String {
        format_currency(self.required_amount)
    }

    /// Records the exit if `amount_input` settles the fee.
    ///
    /// `method` defaults to cash.
    pub fn confirm<T: Transport, N: Notifier, R: Reload>(
        self,
        api: &ParkingApi<T, N, R>,
        amount_input: &str,
        method: Option<PaymentMethod>,
    ) -> Result<ExitReceipt> {
        let method = method.unwrap_or_default();
        let amount = parse_amount(amount_input)
            .map_err(|e| reject(api.notifier(), e.to_string()))?;

        if !amount_matches(amount, self.required_amount) {
            return Err(reject(
                api.notifier(),
                format!(
                    "Payment amount must match the required fee of {}. Please pay the exact amount.",
                    format_currency(self.required_amount)
                ),
            ));
        }
        api.process_exit(self.ticket_id, amount, method)
    }
}

/// Loads the free spots of the ticket's lot and opens the swap dialog.
///
/// Without a lot nothing is requested. An empty lot still opens the dialog,
/// without choices, and says so.
pub fn open_swap_modal<T: Transport, N: Notifier, R: Reload>(
    api: &ParkingApi<T, N, R>,
    ticket_id: u64,
    lot_id: Option<u64>,
    current_spot: Option<&str>,
) -> Result<SwapModal> {
    debug!(
        "Opening swap dialog: ticket={} lot={:?} spot={:?}",
        ticket_id, lot_id, current_spot
    );
    let Some(lot_id) = lot_id else {
        return Err(reject(
            api.notifier(),
            "Cannot determine lot for this ticket. Make sure the ticket has a valid spot assigned."
                .to_string(),
        ));
    };

    let spots = api.available_spots_list(lot_id)?;
    if spots.is_empty() {
        api.notifier().show(
            format!(
                "No available spots found in Lot {}. All spots may be occupied.",
                lot_id
            ),
            Severity::Info,
        );
    }

    Ok(SwapModal {
        ticket_id,
        lot_id,
        current_spot: current_spot.map(str::to_string),
        choices: spots.into_iter().map(SpotChoice::from).collect(),
    })
}

/// Fetches the fee estimate and opens the exit dialog pre-filled with it.
pub fn open_exit_modal<T: Transport, N: Notifier, R: Reload>(
    api: &ParkingApi<T, N, R>,
    ticket_id: u64,
) -> Result<ExitModal> {
    let estimate = api.estimate_exit(ticket_id)?;
    Ok(ExitModal {
        ticket_id,
        required_amount: estimate.estimated_total,
        estimate,
    })
}

/// Exit without an estimate: the operator types amount and method directly.
///
/// `None` for either input means the operator cancelled; nothing happens then.
/// The fee check is left to the backend.
pub fn prompt_process_exit<T: Transport, N: Notifier, R: Reload>(
    api: &ParkingApi<T, N, R>,
    ticket_id: u64,
    amount: Option<&str>,
    method: Option<&str>,
) -> Result<Option<ExitReceipt>> {
    let (Some(amount), Some(method)) = (amount, method) else {
        return Ok(None);
    };
    let amount = parse_amount(amount).map_err(|e| reject(api.notifier(), e.to_string()))?;
    let method = method
        .trim()
        .parse::<PaymentMethod>()
        .map_err(|_| reject(api.notifier(), "Invalid payment method".to_string()))?;
    api.process_exit(ticket_id, amount, method).map(Some)
}

/// Swap without a spot list: the operator types the spot number.
///
/// `confirm` is asked `Swap ticket #<id> to spot <spot>?` and may decline.
/// Returns `Ok(false)` when nothing was sent.
pub fn prompt_swap_spot<T, N, R, F>(
    api: &ParkingApi<T, N, R>,
    ticket_id: u64,
    new_spot: Option<&str>,
    confirm: F,
) -> Result<bool>
where
    T: Transport,
    N: Notifier,
    R: Reload,
    F: FnOnce(&str) -> bool,
{
    let Some(new_spot) = new_spot.map(str::trim).filter(|spot| !spot.is_empty()) else {
        return Ok(false);
    };
    if !confirm(&format!("Swap ticket #{} to spot {}?", ticket_id, new_spot)) {
        return Ok(false);
    }
    api.swap_spot(ticket_id, new_spot).map(|_| true)
}

fn reject<N: Notifier>(notifier: &N, message: String) -> ParkingError {
    warn!("{}", message);
    notifier.show(message.clone(), Severity::Warning);
    ParkingError::Validation(message)
}
