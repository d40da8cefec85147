pub mod flow;
pub mod http;

use flow::BookingFlow;
use http::{ClientError, RentalClient};
use tracing::{info, instrument, warn};

// Glue between the pure state machine and the network. Transitions stay in
// `flow`; these drivers perform the side effects and feed results back.

/// Fetches the catalog and advances the flow to the displayed state.
#[instrument(skip(client, flow))]
pub async fn load_catalog(client: &RentalClient, flow: &mut BookingFlow) -> Result<(), ClientError> {
    flow.load_catalog();
    match client.list_cars().await {
        Ok(cars) => {
            info!(count = cars.len(), "Catalog loaded");
            flow.catalog_loaded(cars);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Failed to load catalog");
            flow.catalog_failed(e.to_string());
            Err(e)
        }
    }
}

/// Submits the current date selection. Returns `Ok(false)` when the flow is
/// not ready to submit (missing dates), without touching the network.
#[instrument(skip(client, flow))]
pub async fn submit_booking(
    client: &RentalClient,
    flow: &mut BookingFlow,
) -> Result<bool, ClientError> {
    let Some(payload) = flow.submit() else {
        return Ok(false);
    };
    match client.create_booking(&payload).await {
        Ok(booking) => {
            info!(booking_id = booking.id, "Booking confirmed");
            flow.submission_succeeded();
            Ok(true)
        }
        Err(e) => {
            warn!(error = %e, "Booking submission failed");
            flow.submission_failed(e.to_string());
            Err(e)
        }
    }
}
