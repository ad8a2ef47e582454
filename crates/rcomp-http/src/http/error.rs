//! HTTP error handling utilities for rcomp

use rcomp::RcompError;
use serde::de::DeserializeOwned;

/// Read the whole response body and decode it as JSON.
///
/// A non-success status becomes [`RcompError::Status`] carrying the body text.
pub async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, RcompError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| RcompError::from_transport_error(e, context))?;

    if !status.is_success() {
        return Err(RcompError::Status {
            context: context.to_string(),
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).trim().to_string(),
        });
    }

    serde_json::from_slice(&body).map_err(|e| RcompError::from_decode_error(e, context))
}

/// Error sink: log the failure and hand it back for propagation.
pub fn report(error: RcompError) -> RcompError {
    log::warn!("{error}");
    error
}
