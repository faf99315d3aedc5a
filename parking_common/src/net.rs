//! Backend endpoint paths and small URL helpers used by the client.

/// Default address of the parking web backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Value of the `status` field that marks a successful envelope.
pub const STATUS_OK: &str = "ok";

/// POST endpoint reassigning a ticket to another spot.
pub const SWAP_SPOT: &str = "/api/swap-spot";
/// POST endpoint closing a ticket and recording its payment.
pub const PROCESS_EXIT: &str = "/api/process-exit";
/// POST endpoint creating a lot together with its default rates.
pub const CREATE_LOT_DEFAULT: &str = "/api/create-lot-default";
/// POST endpoint opening a ticket and marking its spot occupied.
pub const ADD_TICKET: &str = "/api/add-ticket";

/// GET path returning the number of free spots in a lot.
pub fn available_spots(lot_id: u64) -> String {
    format!("/api/available-spots/{}", lot_id)
}

/// GET path returning the free spots of a lot as a list.
pub fn available_spots_list(lot_id: u64) -> String {
    format!("/api/available-spots-list/{}", lot_id)
}

/// GET path returning the fee estimate for an open ticket.
pub fn estimate_exit(ticket_id: u64) -> String {
    format!("/api/estimate-exit/{}", ticket_id)
}

/// GET path returning how much a driver has paid in total.
pub fn driver_total_spent(driver_id: u64) -> String {
    format!("/api/driver-total-spent/{}", driver_id)
}

/// Joins a base URL and an absolute endpoint path without doubling the slash.
pub fn url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paths_with_ids() {
        assert_eq!(available_spots(3), "/api/available-spots/3");
        assert_eq!(available_spots_list(7), "/api/available-spots-list/7");
        assert_eq!(estimate_exit(42), "/api/estimate-exit/42");
        assert_eq!(driver_total_spent(9), "/api/driver-total-spent/9");
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(url("http://host:5000/", SWAP_SPOT), "http://host:5000/api/swap-spot");
        assert_eq!(url("http://host:5000", ADD_TICKET), "http://host:5000/api/add-ticket");
    }
}
