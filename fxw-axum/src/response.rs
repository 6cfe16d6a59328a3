//! The envelope every deal endpoint answers with.

use axum::{Json, http::StatusCode};
use schemars::JsonSchema;
use serde::Serialize;

/// A response body carrying the HTTP status, a human-readable outcome and an
/// optional payload.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// The numeric HTTP status, repeated in the body
    pub status_code: u16,
    /// A description of the outcome
    pub detailed_status_code: String,
    /// The payload, if the outcome carries one
    pub data: Option<T>,
}

/// What handlers return: the status line plus the enveloped body
pub(crate) type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

/// Wrap `data` in an envelope for `status`
pub(crate) fn reply<T>(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Reply<T> {
    (
        status,
        Json(ApiResponse {
            status_code: status.as_u16(),
            detailed_status_code: message.into(),
            data,
        }),
    )
}

/// An envelope without a payload
pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> Reply<()> {
    reply(status, message, None)
}

/// The generic 500 reply; details go to the log, never to the caller
pub(crate) fn internal_error() -> Reply<()> {
    failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
