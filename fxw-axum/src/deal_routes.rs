//! REST API endpoints for individual deals.
//!
//! Creation goes through the ingestion pipeline, so a deal submitted here is
//! held to exactly the same rules as a row of an uploaded file.

use crate::{
    ApiApplication,
    response::{Reply, failure, internal_error, reply},
};
use aide::axum::{
    ApiRouter,
    routing::{get_with, post_with},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use fxw_core::{
    ingest::IngestError,
    models::{Deal, DealId},
    ports::{Application as _, DealRepository as _},
};
use tracing::{Level, event};

/// Path parameter for deal-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct Id {
    /// The identifier of the deal
    deal_id: String,
}

/// Creates a router with deal-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route(
            "/",
            post_with(create_deal::<T>, |op| op.tag("deals"))
                .get_with(list_deals::<T>, |op| op.tag("deals")),
        )
        .api_route("/{deal_id}", get_with(get_deal::<T>, |op| op.tag("deals")))
}

/// Validate and store a new deal.
///
/// # Returns
///
/// - `201 Created`: the stored deal
/// - `406 Not Acceptable`: the deal broke a validation rule
/// - `409 Conflict`: a deal with the same identifier already exists
/// - `500 Internal Server Error`: the store failed
async fn create_deal<T: ApiApplication>(
    State(app): State<T>,
    Json(deal): Json<Deal>,
) -> Result<Reply<Deal>, Reply<()>> {
    match app.ingestor().ingest_one(deal).await {
        Ok(stored) => Ok(reply(
            StatusCode::CREATED,
            "Deal created successfully",
            Some(stored),
        )),
        Err(IngestError::Invalid(err)) => Err(failure(
            StatusCode::NOT_ACCEPTABLE,
            format!("Invalid Deal Object elements: {err}"),
        )),
        Err(IngestError::Duplicate(_)) => Err(failure(
            StatusCode::CONFLICT,
            "Deal with the same ID already exists",
        )),
        Err(err @ IngestError::Store(_)) => {
            event!(Level::ERROR, err = err.to_string());
            Err(internal_error())
        }
    }
}

/// List every stored deal, in the order they were written.
///
/// # Returns
///
/// - `200 OK`: the deals
/// - `500 Internal Server Error`: the store failed
async fn list_deals<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Reply<Vec<Deal>>, Reply<()>> {
    let deals = app.database().list_deals().await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        internal_error()
    })?;

    Ok(reply(
        StatusCode::OK,
        "Deals fetched successfully",
        Some(deals),
    ))
}

/// Retrieve a single deal.
///
/// # Returns
///
/// - `200 OK`: the deal
/// - `404 Not Found`: no deal has this identifier
/// - `500 Internal Server Error`: the store failed
async fn get_deal<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { deal_id }): Path<Id>,
) -> Result<Reply<Deal>, Reply<()>> {
    let deal_id = DealId::from(deal_id);

    let deal = app
        .database()
        .get_deal(&deal_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            internal_error()
        })?
        .ok_or_else(|| {
            failure(
                StatusCode::NOT_FOUND,
                format!("Deal not found with ID: {deal_id}"),
            )
        })?;

    Ok(reply(
        StatusCode::OK,
        "Deal retrieved successfully",
        Some(deal),
    ))
}
