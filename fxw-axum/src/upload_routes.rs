//! Bulk ingestion of line-delimited deal files.

use crate::{
    ApiApplication,
    response::{Reply, reply},
};
use aide::{
    OperationInput,
    axum::{ApiRouter, routing::post_with},
    generate::GenContext,
    openapi::{MediaType, Operation, RequestBody},
    operation::set_body,
};
use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
};
use futures::{Stream, TryStreamExt as _};
use fxw_core::{
    ingest::{BatchError, BatchReport},
    ports::{Application as _, TextLines},
};
use tokio_util::io::StreamReader;
use tracing::{Level, event};

/// The multipart field that carries the file
const FILE_FIELD: &str = "file";

/// Creates a router with the upload endpoint.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route(
            "/",
            post_with(upload_deals::<T>, |op| {
                op.tag("upload")
                    .description("Ingest every row of a deal file")
            }),
        )
        .layer(DefaultBodyLimit::disable())
}

/// An uploaded deal file, either as the `file` field of a multipart form or
/// as the raw request body.
enum Upload {
    Multipart(Multipart),
    Raw(Body),
}

impl<S: Send + Sync> FromRequest<S> for Upload {
    type Rejection = Reply<BatchReport>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            return Ok(Self::Raw(req.into_body()));
        }

        Multipart::from_request(req, state)
            .await
            .map(Self::Multipart)
            .map_err(|rejection| {
                event!(Level::ERROR, err = rejection.body_text(), "bad multipart upload");
                unreadable(None)
            })
    }
}

impl OperationInput for Upload {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        set_body(
            ctx,
            operation,
            RequestBody {
                description: Some(format!(
                    "One deal per line: dealId,fromCurrencyISO,toCurrencyISO,dealTimestamp,dealAmount. \
                     Send it as the `{FILE_FIELD}` field of a multipart form, or as the raw body."
                )),
                content: ["multipart/form-data", "text/csv", "text/plain"]
                    .into_iter()
                    .map(|media| (media.to_owned(), MediaType::default()))
                    .collect(),
                required: true,
                ..Default::default()
            },
        );
    }
}

/// Ingest every row of the uploaded file.
///
/// The file is read incrementally and handed to the pipeline line by line,
/// so it is never held in memory as a whole.
///
/// # Returns
///
/// - `201 Created`: the batch report, whatever the per-row outcomes were
/// - `400 Bad Request`: a multipart form without a `file` field
/// - `406 Not Acceptable`: the file is empty, or could not be read (the
///   report then covers the rows read before the failure)
async fn upload_deals<T: ApiApplication>(
    State(app): State<T>,
    upload: Upload,
) -> Result<Reply<BatchReport>, Reply<BatchReport>> {
    let mut multipart = match upload {
        Upload::Raw(body) => return ingest_stream(&app, body.into_data_stream()).await,
        Upload::Multipart(multipart) => multipart,
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FILE_FIELD) => {
                return ingest_stream(&app, field).await;
            }
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(reply(
                    StatusCode::BAD_REQUEST,
                    "Missing file in multipart request",
                    None,
                ));
            }
            Err(err) => {
                event!(Level::ERROR, err = err.body_text(), "bad multipart upload");
                return Err(unreadable(None));
            }
        }
    }
}

async fn ingest_stream<T, S, E>(app: &T, stream: S) -> Result<Reply<BatchReport>, Reply<BatchReport>>
where
    T: ApiApplication,
    S: Stream<Item = Result<Bytes, E>> + Send,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let stream = Box::pin(stream.map_err(std::io::Error::other));
    let rows = TextLines::new(StreamReader::new(stream));

    match app.ingestor().ingest_batch(rows).await {
        Ok(report) => Ok(reply(
            StatusCode::CREATED,
            "CSV file rows processed",
            Some(report),
        )),
        Err(BatchError::Empty) => Err(reply(
            StatusCode::NOT_ACCEPTABLE,
            "File is empty, Cannot process empty file",
            None,
        )),
        Err(BatchError::Unreadable { report, source, .. }) => {
            event!(Level::ERROR, err = source.to_string(), "upload aborted");
            Err(unreadable(Some(report)))
        }
    }
}

fn unreadable(report: Option<BatchReport>) -> Reply<BatchReport> {
    reply(StatusCode::NOT_ACCEPTABLE, "Unable to read uploaded file", report)
}
