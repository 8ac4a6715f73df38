//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod goals;
pub mod insights;
pub mod settings;

// Re-export all handlers for use in router
pub use goals::*;
pub use insights::*;
pub use settings::*;

use serde::de::DeserializeOwned;

use crate::AppError;

/// Maximum accepted JSON body size
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Read and parse a JSON request body
pub(crate) async fn parse_json_body<T: DeserializeOwned>(
    body: axum::body::Body,
) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))
}
