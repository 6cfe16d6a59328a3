use crate::IOArgs;
use fxw_core::{
    ingest::BatchError,
    ports::{Application, TextLines},
};
use std::io::Write as _;
use tracing::{Level, event};

/// Ingest the batch named by `args` and write its report.
///
/// The report is written whenever any row was read, including when the input
/// failed part-way through; the error is returned afterwards.
pub async fn import<A>(app: &A, args: &IOArgs) -> anyhow::Result<()>
where
    A: Application<Repository: Sync, Currencies: Sync>,
{
    event!(Level::INFO, batch = %args, "importing deals");

    let rows = TextLines::new(args.read().await?);
    let (report, failure) = match app.ingestor().ingest_batch(rows).await {
        Ok(report) => (report, None),
        Err(BatchError::Unreadable {
            line,
            report,
            source,
        }) => (
            report,
            Some(anyhow::Error::new(source).context(format!("unable to read line {line}"))),
        ),
        Err(err @ BatchError::Empty) => return Err(err.into()),
    };

    let mut output = args.write()?;
    serde_json::to_writer_pretty(&mut output, &report)?;
    writeln!(output)?;
    output.flush()?;

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
