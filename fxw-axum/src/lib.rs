#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the fxw-core crate.
//! [fxw_core]: https://docs.rs/fxw_core/latest/fxw_core/index.html
#![doc = include_str!("../README.md")]

mod deal_routes;
mod upload_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use fxw_core::ports::Application;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

pub mod response;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router over the given state.
///
/// The generated OpenAPI document is shared with the docs routes through an
/// [`Extension`].
pub fn router<T: ApiApplication>(state: T) -> axum::Router {
    let mut api = OpenApi::default();
    ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/api/deals", deal_routes::router())
        .nest("/api/upload", upload_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api)))
        .with_state(state)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Repository: Send + Sync + 'static,
        Currencies: Send + Sync + 'static,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<Repository: Send + Sync + 'static, Currencies: Send + Sync + 'static>
{
}
