//! Request and response payloads exchanged with the parking backend.
//!
//! Field names follow the backend exactly: camelCase for the ticket endpoints and
//! PascalCase for the lot/ticket creation endpoints. Mutating endpoints answer with
//! an envelope carrying `status` (`"ok"` on success) and an optional `message`.
use serde::{Deserialize, Serialize};

use crate::net::STATUS_OK;
use crate::payment::PaymentMethod;

/// Status/message pair present on every envelope response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    /// `"ok"` on success, anything else (or absent) is a failure.
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable failure reason supplied by the backend.
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Returns `true` only when the backend explicitly marked the call successful.
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }
}

/// Free spot count of one lot.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailableSpots {
    /// Lot the count belongs to.
    #[serde(rename = "lotId", default)]
    pub lot_id: Option<u64>,
    /// Number of unoccupied spots.
    pub available: u64,
}

/// A free spot offered in the swap dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    /// Database id of the spot.
    #[serde(rename = "SpotID")]
    pub spot_id: u64,
    /// Display code such as `A12`.
    #[serde(rename = "SpotNumber")]
    pub spot_number: String,
}

/// Free spots of one lot.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotList {
    #[serde(rename = "lotId", default)]
    pub lot_id: Option<u64>,
    #[serde(default)]
    pub spots: Vec<Spot>,
}

/// Body of `POST /api/swap-spot`.
#[derive(Debug, Clone, Serialize)]
pub struct SwapSpotRequest {
    #[serde(rename = "ticketId")]
    pub ticket_id: u64,
    #[serde(rename = "newSpotNumber")]
    pub new_spot_number: String,
}

/// Body of `POST /api/process-exit`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessExitRequest {
    #[serde(rename = "ticketId")]
    pub ticket_id: u64,
    #[serde(rename = "amountPaid")]
    pub amount_paid: f64,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
}

/// Successful answer of `POST /api/process-exit`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExitReceipt {
    /// Ticket echoed back by the backend; display only.
    #[serde(rename = "ticketId", default)]
    pub ticket_id: Option<u64>,
    /// Payment status of the ticket after the exit, e.g. `Paid`.
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: Option<String>,
}

/// Fee estimate for an open ticket, computed server-side without closing it.
#[derive(Debug, Clone, Deserialize)]
pub struct ExitEstimate {
    /// Ticket echoed back by the backend; display only.
    #[serde(rename = "ticketId", default)]
    pub ticket_id: Option<u64>,
    /// Entry time as an ISO-8601 string.
    #[serde(rename = "entryTime", default)]
    pub entry_time: Option<String>,
    /// Exact parked duration in hours.
    #[serde(rename = "estimatedHours", default)]
    pub estimated_hours: f64,
    /// Duration rounded up to whole hours.
    #[serde(rename = "billedHours", default)]
    pub billed_hours: u64,
    #[serde(rename = "ratePerHour", default)]
    pub rate_per_hour: f64,
    /// Amount the exit desk must collect.
    #[serde(rename = "estimatedTotal")]
    pub estimated_total: f64,
}

/// Body of `POST /api/create-lot-default`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLotRequest {
    #[serde(rename = "LotName")]
    pub lot_name: String,
    #[serde(rename = "Capacity")]
    pub capacity: u32,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Levels")]
    pub levels: u32,
}

/// Body of `POST /api/add-ticket`.
#[derive(Debug, Clone, Serialize)]
pub struct AddTicketRequest {
    #[serde(rename = "LicensePlate")]
    pub license_plate: String,
    #[serde(rename = "SpotID")]
    pub spot_id: u64,
    #[serde(rename = "RateID")]
    pub rate_id: u64,
    /// `YYYY-MM-DD HH:MM:SS`; `null` lets the backend use the current time.
    #[serde(rename = "EntryTime")]
    pub entry_time: Option<String>,
}

/// Total paid by a driver across all tickets.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverTotalSpent {
    #[serde(rename = "driverId", default)]
    pub driver_id: Option<u64>,
    #[serde(rename = "totalSpent")]
    pub total_spent: f64,
}
