use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status; always "ok" for a running instance.
    pub status: String,
    /// Matches currently held in the registry.
    pub open_matches: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(open_matches: usize) -> Self {
        Self {
            status: "ok".to_string(),
            open_matches,
        }
    }
}
