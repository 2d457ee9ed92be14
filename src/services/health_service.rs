use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a static health payload plus the open-match gauge.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.open_matches())
}
