use nl_core::{Endpoint, SolveError};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Body of `GET /`.
#[derive(Clone, Debug, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Strictly decode a response body. Any shape mismatch is a malformed
/// response; nothing is defaulted.
pub fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> Result<T, SolveError> {
    serde_json::from_slice(body).map_err(|e| SolveError::MalformedResponse {
        endpoint,
        detail: e.to_string(),
    })
}
