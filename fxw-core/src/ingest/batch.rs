use super::Ingestor;
use crate::{
    models::{Deal, DealId, ParseError},
    ports::{CurrencyRegistry, DealRepository, DuplicateDeal, LineSource},
    validation::{ValidationError, validate},
};
use thiserror::Error;
use tracing::{Level, event};

/// Why a single batch row was not stored
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", content = "detail", rename_all = "snake_case")
)]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// The row does not describe a deal
    #[error("unparseable row: {0}")]
    Parse(#[from] ParseError),

    /// The deal broke a business rule
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The store failed while handling this row
    #[error("deal store failure: {0}")]
    Store(String),
}

/// A rejected row, with enough context to diagnose it
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// The 1-based position of the row in the input
    pub line: usize,
    /// The row exactly as it was read
    pub row: String,
    /// What went wrong
    pub error: RowError,
}

/// Aggregate outcome of a batch.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Rows consumed from the source
    pub rows: usize,
    /// Rows stored as new deals
    pub succeeded: usize,
    /// Rows skipped because the identifier was already stored
    pub duplicates: usize,
    /// Rows rejected, in input order
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    /// Rows that did not describe a deal
    pub fn parse_failures(&self) -> usize {
        self.count(|error| matches!(error, RowError::Parse(_)))
    }

    /// Rows that broke a business rule
    pub fn validation_failures(&self) -> usize {
        self.count(|error| matches!(error, RowError::Invalid(_)))
    }

    /// Rows lost to a store failure
    pub fn store_failures(&self) -> usize {
        self.count(|error| matches!(error, RowError::Store(_)))
    }

    fn count(&self, predicate: impl Fn(&RowError) -> bool) -> usize {
        self.failures
            .iter()
            .filter(|failure| predicate(&failure.error))
            .count()
    }
}

/// Input-level failures of a batch. Row-level problems never surface here.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The source produced no rows at all
    #[error("the batch input is empty")]
    Empty,

    /// The source failed while being read. Rows before `line` have already
    /// been processed and are described by `report`.
    #[error("unable to read batch input at line {line}: {source}")]
    Unreadable {
        /// The line that could not be read
        line: usize,
        /// Outcomes of the rows read before the failure
        report: BatchReport,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

enum RowStatus {
    Stored,
    Duplicate(DealId),
}

impl<'a, R, C> Ingestor<'a, R, C>
where
    R: DealRepository + Sync,
    C: CurrencyRegistry + Sync,
{
    /// Ingest every row produced by `rows`.
    ///
    /// Rows are pulled one at a time and handled in order; the whole input is
    /// never buffered. For each row: parse, skip if the identifier is already
    /// stored, validate, then store. A failing row is recorded in the report
    /// and processing moves on to the next one.
    ///
    /// Repeated identifiers inside one batch are not tracked separately; each
    /// row consults the store, so a later repeat of an identifier written
    /// earlier in the same batch is counted as a duplicate.
    pub async fn ingest_batch<S: LineSource>(&self, mut rows: S) -> Result<BatchReport, BatchError> {
        let mut report = BatchReport::default();

        loop {
            let line = report.rows + 1;
            let row = match rows.next_line().await {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(source) => {
                    event!(
                        Level::ERROR,
                        line,
                        err = source.to_string(),
                        "unable to read batch input"
                    );
                    return Err(BatchError::Unreadable {
                        line,
                        report,
                        source,
                    });
                }
            };
            report.rows = line;

            match self.ingest_row(&row).await {
                Ok(RowStatus::Stored) => report.succeeded += 1,
                Ok(RowStatus::Duplicate(deal_id)) => {
                    event!(Level::WARN, line, deal_id = %deal_id, "deal already exists, skipping row");
                    report.duplicates += 1;
                }
                Err(error) => {
                    event!(
                        Level::ERROR,
                        line,
                        row = row.as_str(),
                        err = error.to_string(),
                        "rejected row"
                    );
                    report.failures.push(RowFailure { line, row, error });
                }
            }
        }

        if report.rows == 0 {
            return Err(BatchError::Empty);
        }

        event!(
            Level::INFO,
            rows = report.rows,
            succeeded = report.succeeded,
            duplicates = report.duplicates,
            failed = report.failures.len(),
            "batch complete"
        );

        Ok(report)
    }

    async fn ingest_row(&self, row: &str) -> Result<RowStatus, RowError> {
        let deal: Deal = row.parse()?;

        if self
            .repository
            .deal_exists(&deal.deal_id)
            .await
            .map_err(|err| RowError::Store(err.to_string()))?
        {
            return Ok(RowStatus::Duplicate(deal.deal_id));
        }

        validate(&deal, self.currencies)?;

        // A concurrent writer may have claimed the identifier since the check above
        match self
            .repository
            .save_deal(deal)
            .await
            .map_err(|err| RowError::Store(err.to_string()))?
        {
            Ok(_) => Ok(RowStatus::Stored),
            Err(DuplicateDeal(deal_id)) => Ok(RowStatus::Duplicate(deal_id)),
        }
    }
}
