//! One wrapper per backend endpoint.
//!
//! Every wrapper follows the same contract: send the request, treat a non-2xx
//! status, an unparsable body or an envelope without `status == "ok"` as a failure,
//! and turn the outcome into a notification. Failures are shown as `danger` and
//! returned as `Err`; successful mutations are shown as `success` and followed by
//! a delayed page reload. Nothing is retried.
use std::time::Duration;

use log::{debug, info};
use parking_common::model::{
    AddTicketRequest, AvailableSpots, CreateLotRequest, DriverTotalSpent, Envelope, ExitEstimate,
    ExitReceipt, ProcessExitRequest, Spot, SpotList, SwapSpotRequest,
};
use parking_common::{net, Notifier, ParkingError, PaymentMethod, Result, Severity};
use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};

use crate::config::UiTimings;
use crate::page::Reload;
use crate::transport::{HttpReply, Transport};

/// Parameters of one state-changing call.
struct Mutation<'a> {
    path: &'a str,
    /// Shown when the backend gives no message of its own.
    fallback: &'a str,
    failure_prefix: &'a str,
    success: &'a str,
    reload_after: Duration,
}

/// Client for the parking backend.
pub struct ParkingApi<T, N, R> {
    transport: T,
    notifier: N,
    reload: R,
    timings: UiTimings,
}

impl<T: Transport, N: Notifier, R: Reload> ParkingApi<T, N, R> {
    pub fn new(transport: T, notifier: N, reload: R, timings: UiTimings) -> Self {
        Self {
            transport,
            notifier,
            reload,
            timings,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn timings(&self) -> &UiTimings {
        &self.timings
    }

    /// Number of free spots in `lot_id`.
    pub fn get_available_spots(&self, lot_id: u64) -> Result<u64> {
        self.transport
            .get(&net::available_spots(lot_id))
            .and_then(plain::<AvailableSpots>)
            .map(|spots| spots.available)
            .inspect_err(|e| {
                debug!("Fetching available spots of lot {} failed: {}", lot_id, e);
                self.notifier
                    .show("Failed to fetch available spots", Severity::Danger);
            })
    }

    /// Free spots of `lot_id`, ordered by spot number.
    pub fn available_spots_list(&self, lot_id: u64) -> Result<Vec<Spot>> {
        self.transport
            .get(&net::available_spots_list(lot_id))
            .and_then(plain::<SpotList>)
            .map(|list| list.spots)
            .inspect_err(|e| {
                debug!("Listing available spots of lot {} failed: {}", lot_id, e);
                self.notifier.show(
                    format!("Failed to load available spots: {}", e),
                    Severity::Danger,
                );
            })
    }

    /// Moves an open ticket to another spot of the same lot.
    pub fn swap_spot(&self, ticket_id: u64, new_spot_number: &str) -> Result<()> {
        let body = SwapSpotRequest {
            ticket_id,
            new_spot_number: new_spot_number.to_string(),
        };
        self.mutate::<_, Envelope>(
            Mutation {
                path: net::SWAP_SPOT,
                fallback: "Swap failed",
                failure_prefix: "Swap failed",
                success: "Spot swapped successfully",
                reload_after: self.timings.mutation_reload,
            },
            &body,
        )
        .map(|_| ())
    }

    /// Closes a ticket and records its payment.
    pub fn process_exit(
        &self,
        ticket_id: u64,
        amount_paid: f64,
        payment_method: PaymentMethod,
    ) -> Result<ExitReceipt> {
        let body = ProcessExitRequest {
            ticket_id,
            amount_paid,
            payment_method,
        };
        self.mutate(
            Mutation {
                path: net::PROCESS_EXIT,
                fallback: "Process exit failed",
                failure_prefix: "Exit failed",
                success: "Exit processed and payment recorded",
                reload_after: self.timings.exit_reload,
            },
            &body,
        )
    }

    /// Fee the ticket would be charged if it left now. Read-only on the backend.
    pub fn estimate_exit(&self, ticket_id: u64) -> Result<ExitEstimate> {
        self.transport
            .get(&net::estimate_exit(ticket_id))
            .and_then(|reply| envelope(reply, "Estimate failed"))
            .inspect_err(|e| {
                debug!("Estimating exit of ticket {} failed: {}", ticket_id, e);
                self.notifier
                    .show("Failed to estimate exit total", Severity::Danger);
            })
    }

    /// Creates a lot and lets the backend attach its default rates.
    ///
    /// `location` defaults to an empty string and `levels` to 1.
    pub fn create_lot_with_defaults(
        &self,
        lot_name: &str,
        capacity: u32,
        location: Option<&str>,
        levels: Option<u32>,
    ) -> Result<()> {
        let body = CreateLotRequest {
            lot_name: lot_name.to_string(),
            capacity,
            location: location.unwrap_or_default().to_string(),
            levels: levels.unwrap_or(1),
        };
        self.mutate::<_, Envelope>(
            Mutation {
                path: net::CREATE_LOT_DEFAULT,
                fallback: "Create lot failed",
                failure_prefix: "Create lot failed",
                success: "Lot created with default rates",
                reload_after: self.timings.mutation_reload,
            },
            &body,
        )
        .map(|_| ())
    }

    /// Opens a ticket for `license_plate` and marks the spot occupied.
    ///
    /// Without `entry_time` the backend stamps the current time.
    pub fn add_ticket_and_occupy(
        &self,
        license_plate: &str,
        spot_id: u64,
        rate_id: u64,
        entry_time: Option<&str>,
    ) -> Result<()> {
        let body = AddTicketRequest {
            license_plate: license_plate.to_string(),
            spot_id,
            rate_id,
            entry_time: entry_time.map(str::to_string),
        };
        self.mutate::<_, Envelope>(
            Mutation {
                path: net::ADD_TICKET,
                fallback: "Add ticket failed",
                failure_prefix: "Add ticket failed",
                success: "Ticket created and spot occupied",
                reload_after: self.timings.mutation_reload,
            },
            &body,
        )
        .map(|_| ())
    }

    /// Total a driver has paid over all tickets.
    pub fn driver_total_spent(&self, driver_id: u64) -> Result<f64> {
        self.transport
            .get(&net::driver_total_spent(driver_id))
            .and_then(|reply| envelope::<DriverTotalSpent>(reply, "Lookup failed"))
            .map(|total| total.total_spent)
            .inspect_err(|e| {
                debug!("Fetching total spent of driver {} failed: {}", driver_id, e);
                self.notifier.show(
                    format!("Failed to fetch driver total: {}", reason(e)),
                    Severity::Danger,
                );
            })
    }

    fn mutate<B: Serialize, D: DeserializeOwned>(&self, op: Mutation<'_>, body: &B) -> Result<D> {
        let outcome = serde_json::to_value(body)
            .map_err(ParkingError::from)
            .and_then(|value| self.transport.post_json(op.path, &value))
            .and_then(|reply| envelope::<D>(reply, op.fallback));

        match outcome {
            Ok(payload) => {
                info!("{} {}", op.path, op.success);
                self.notifier.show(op.success, Severity::Success);
                self.reload.schedule(op.reload_after);
                Ok(payload)
            }
            Err(e) => {
                debug!("{} {}: {}", op.path, op.failure_prefix, e);
                self.notifier.show(
                    format!("{}: {}", op.failure_prefix, reason(&e)),
                    Severity::Danger,
                );
                Err(e)
            }
        }
    }
}

/// Text shown for a failure: the backend message when there is one.
fn reason(err: &ParkingError) -> String {
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}

/// Decodes a response without envelope; only the status code decides success.
fn plain<D: DeserializeOwned>(reply: HttpReply) -> Result<D> {
    if !reply.is_success() {
        let message = serde_json::from_str::<Envelope>(&reply.body)
            .ok()
            .and_then(|envelope| envelope.message);
        return Err(ParkingError::Status {
            status: reply.status,
            message,
        });
    }
    Ok(serde_json::from_str(&reply.body)?)
}

/// Decodes an envelope response; success needs a 2xx status and `status == "ok"`.
fn envelope<D: DeserializeOwned>(reply: HttpReply, fallback: &str) -> Result<D> {
    let value: serde_json::Value = serde_json::from_str(&reply.body)?;
    let envelope = Envelope::deserialize(&value)?;

    if !reply.is_success() || !envelope.is_ok() {
        let message = envelope.message.unwrap_or_else(|| fallback.to_string());
        return Err(if reply.is_success() {
            ParkingError::Backend(message)
        } else {
            ParkingError::Status {
                status: reply.status,
                message: Some(message),
            }
        });
    }
    Ok(D::deserialize(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::recording::RecordingReload;
    use crate::transport::fake::FakeTransport;
    use parking_common::notice::NotificationTray;
    use parking_common::Notification;
    use serde_json::json;

    type TestApi<'a> = ParkingApi<&'a FakeTransport, &'a NotificationTray, &'a RecordingReload>;

    fn api<'a>(
        transport: &'a FakeTransport,
        tray: &'a NotificationTray,
        reload: &'a RecordingReload,
    ) -> TestApi<'a> {
        ParkingApi::new(transport, tray, reload, UiTimings::default())
    }

    #[test]
    fn available_spots_returns_count() {
        let transport = FakeTransport::new().reply(200, r#"{"lotId":2,"available":17}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        assert_eq!(api(&transport, &tray, &reload).get_available_spots(2).unwrap(), 17);
        assert_eq!(transport.calls()[0].path, "/api/available-spots/2");
        assert!(tray.active().is_empty());
    }

    #[test]
    fn available_spots_failure_uses_generic_message() {
        let transport = FakeTransport::new().reply(500, "Internal Server Error");
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        let err = api(&transport, &tray, &reload).get_available_spots(2).unwrap_err();
        assert!(matches!(err, ParkingError::Status { status: 500, .. }));
        assert_eq!(
            tray.last(),
            Some(Notification::new("Failed to fetch available spots", Severity::Danger))
        );
    }

    #[test]
    fn spot_list_failure_reports_status() {
        let transport = FakeTransport::new().reply(404, "not found");
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        assert!(api(&transport, &tray, &reload).available_spots_list(9).is_err());
        assert_eq!(tray.last().unwrap().message, "Failed to load available spots: Status 404");
    }

    #[test]
    fn swap_posts_body_notifies_and_reloads() {
        let transport = FakeTransport::new().reply(200, r#"{"status":"ok"}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        api(&transport, &tray, &reload).swap_spot(11, "B07").unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, "POST");
        assert_eq!(call.path, "/api/swap-spot");
        assert_eq!(call.body, Some(json!({"ticketId": 11, "newSpotNumber": "B07"})));
        assert_eq!(
            tray.last(),
            Some(Notification::new("Spot swapped successfully", Severity::Success))
        );
        assert_eq!(reload.delays(), vec![Duration::from_millis(700)]);
    }

    #[test]
    fn swap_failure_shows_server_message_without_reload() {
        let transport = FakeTransport::new()
            .reply(400, r#"{"status":"error","message":"Spot A12 is occupied"}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        let err = api(&transport, &tray, &reload).swap_spot(11, "A12").unwrap_err();
        assert_eq!(err.server_message(), Some("Spot A12 is occupied"));
        assert_eq!(
            tray.last(),
            Some(Notification::new("Swap failed: Spot A12 is occupied", Severity::Danger))
        );
        assert!(reload.delays().is_empty());
    }

    #[test]
    fn ok_transport_without_ok_status_is_a_failure() {
        let transport = FakeTransport::new().reply(200, r#"{"ticketId":3}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        let err = api(&transport, &tray, &reload)
            .create_lot_with_defaults("North", 40, None, None)
            .unwrap_err();
        assert!(matches!(err, ParkingError::Backend(_)));
        assert_eq!(tray.last().unwrap().message, "Create lot failed: Create lot failed");
    }

    #[test]
    fn malformed_json_is_a_failure() {
        let transport = FakeTransport::new().reply(200, "<html>oops</html>");
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        let err = api(&transport, &tray, &reload).swap_spot(1, "A1").unwrap_err();
        assert!(matches!(err, ParkingError::SerdeJson(_)));
        let shown = tray.last().unwrap();
        assert_eq!(shown.severity, Severity::Danger);
        assert!(shown.message.starts_with("Swap failed: JSON"));
    }

    #[test]
    fn network_failure_is_reported() {
        let transport = FakeTransport::new().unreachable();
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        let err = api(&transport, &tray, &reload)
            .add_ticket_and_occupy("KA01AB1234", 3, 2, None)
            .unwrap_err();
        assert!(matches!(err, ParkingError::Transport(_)));
        assert_eq!(
            tray.last().unwrap().message,
            "Add ticket failed: Transport error: connection refused"
        );
    }

    #[test]
    fn process_exit_returns_receipt_and_reloads_later() {
        let transport = FakeTransport::new()
            .reply(200, r#"{"status":"ok","ticketId":5,"paymentStatus":"Paid"}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        let receipt = api(&transport, &tray, &reload)
            .process_exit(5, 45.0, PaymentMethod::CreditCard)
            .unwrap();
        assert_eq!(receipt.ticket_id, Some(5));
        assert_eq!(receipt.payment_status.as_deref(), Some("Paid"));
        assert_eq!(
            transport.calls()[0].body,
            Some(json!({"ticketId": 5, "amountPaid": 45.0, "paymentMethod": "Credit Card"}))
        );
        assert_eq!(
            tray.last().unwrap().message,
            "Exit processed and payment recorded"
        );
        assert_eq!(reload.delays(), vec![Duration::from_millis(800)]);
    }

    #[test]
    fn bare_ok_envelope_is_success() {
        let transport = FakeTransport::new()
            .reply(200, r#"{"status":"ok"}"#)
            .reply(200, r#"{"status":"ok","estimatedTotal":45.0}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());
        let api = api(&transport, &tray, &reload);

        let receipt = api.process_exit(5, 45.0, PaymentMethod::Cash).unwrap();
        assert_eq!(receipt.ticket_id, None);
        assert_eq!(receipt.payment_status, None);
        assert_eq!(
            tray.last(),
            Some(Notification::new("Exit processed and payment recorded", Severity::Success))
        );
        assert_eq!(reload.delays(), vec![Duration::from_millis(800)]);

        let estimate = api.estimate_exit(5).unwrap();
        assert_eq!(estimate.ticket_id, None);
        assert_eq!(estimate.estimated_total, 45.0);
    }

    #[test]
    fn error_status_fails_even_with_ok_body() {
        let transport = FakeTransport::new().reply(500, r#"{"status":"ok"}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        let err = api(&transport, &tray, &reload).swap_spot(2, "A1").unwrap_err();
        assert!(matches!(err, ParkingError::Status { status: 500, .. }));
        assert_eq!(tray.last().unwrap().message, "Swap failed: Swap failed");
        assert!(reload.delays().is_empty());
    }

    #[test]
    fn create_lot_fills_defaults() {
        let transport = FakeTransport::new().reply(200, r#"{"status":"ok"}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        api(&transport, &tray, &reload)
            .create_lot_with_defaults("North", 40, None, None)
            .unwrap();
        assert_eq!(
            transport.calls()[0].body,
            Some(json!({"LotName": "North", "Capacity": 40, "Location": "", "Levels": 1}))
        );
        assert_eq!(tray.last().unwrap().message, "Lot created with default rates");
    }

    #[test]
    fn estimate_requires_ok_envelope() {
        let transport = FakeTransport::new()
            .reply(200, r#"{"status":"ok","ticketId":5,"billedHours":3,"ratePerHour":15.0,"estimatedTotal":45.0}"#)
            .reply(404, r#"{"status":"error","message":"Ticket not found"}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());
        let api = api(&transport, &tray, &reload);

        let estimate = api.estimate_exit(5).unwrap();
        assert_eq!(estimate.estimated_total, 45.0);
        assert_eq!(estimate.billed_hours, 3);

        assert!(api.estimate_exit(6).is_err());
        assert_eq!(
            tray.last(),
            Some(Notification::new("Failed to estimate exit total", Severity::Danger))
        );
    }

    #[test]
    fn driver_total_spent_reads_amount() {
        let transport =
            FakeTransport::new().reply(200, r#"{"status":"ok","driverId":4,"totalSpent":310.5}"#);
        let (tray, reload) = (NotificationTray::default(), RecordingReload::default());

        assert_eq!(api(&transport, &tray, &reload).driver_total_spent(4).unwrap(), 310.5);
        assert_eq!(transport.calls()[0].path, "/api/driver-total-spent/4");
    }
}
