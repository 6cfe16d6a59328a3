//! OpenAPI document generation and the interactive documentation page.

use std::sync::Arc;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

/// Serve the RapiDoc page, which renders `/docs/api.json`.
async fn serve_rapidoc() -> impl IntoApiResponse {
    let html = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <script src="https://cdnjs.cloudflare.com/ajax/libs/rapidoc/9.3.8/rapidoc-min.js" integrity="sha512-0ES6eX4K9J1PrIEjIizv79dTlN5HwI2GW9Ku6ymb8dijMHF5CIplkS8N0iFJ/wl3GybCSqBJu8HDhiFkZRAf0g==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        show-method-in-nav-bar="as-colored-text"
        use-path-in-nav-bar="true"
        render-style="focused"
    ></rapi-doc>
  </body>
</html>"#;
    Html(html).into_response()
}

/// Serve the generated OpenAPI document as JSON.
async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Creates a router for documentation endpoints.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(serve_rapidoc))
        .route("/api.json", get(serve_docs))
}

/// Document-level metadata.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("FX Deal Warehouse API")
        .summary("Accepts, validates and stores foreign-exchange deals.")
        .description("Deals can be submitted one at a time as JSON or streamed in bulk as a line-delimited file. Every deal passes the same validation rules and is stored at most once per identifier.")
        .version(env!("CARGO_PKG_VERSION"))
        .tag(Tag {
            name: "deals".into(),
            description: Some("Create and query individual deals".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "upload".into(),
            description: Some("Bulk ingestion of line-delimited deal files".into()),
            ..Default::default()
        })
}
