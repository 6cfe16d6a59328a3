//! The ingestion pipeline: the only write path into the deal store.
//!
//! An [`Ingestor`] borrows a [`DealRepository`] and a [`CurrencyRegistry`] and
//! offers two entry points sharing one acceptance rule:
//!
//! - [`Ingestor::ingest_one`] is all-or-nothing; the first failure is returned.
//! - [`Ingestor::ingest_batch`] consumes a [`crate::ports::LineSource`] row by
//!   row, isolates per-row failures and reports aggregate outcomes.

use crate::{
    models::Deal,
    ports::{CurrencyRegistry, DealRepository, DuplicateDeal},
    validation::{ValidationError, validate},
};
use thiserror::Error;
use tracing::{Level, event};

mod batch;
pub use batch::{BatchError, BatchReport, RowError, RowFailure};

/// The ways in which creating a single deal can fail
#[derive(Debug, Error)]
pub enum IngestError<E: std::error::Error + 'static> {
    /// The deal broke a business rule
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A deal with the same identifier is already stored
    #[error(transparent)]
    Duplicate(#[from] DuplicateDeal),

    /// The store failed for a reason other than duplication
    #[error("deal store failure: {0}")]
    Store(#[source] E),
}

/// Orchestrates validation and persistence of deals.
pub struct Ingestor<'a, R, C> {
    repository: &'a R,
    currencies: &'a C,
}

impl<'a, R, C> Ingestor<'a, R, C> {
    /// Construct a pipeline over the given collaborators
    pub fn new(repository: &'a R, currencies: &'a C) -> Self {
        Self {
            repository,
            currencies,
        }
    }
}

impl<'a, R, C> Ingestor<'a, R, C>
where
    R: DealRepository + Sync,
    C: CurrencyRegistry + Sync,
{
    /// Validate and store a single deal.
    ///
    /// Nothing is written unless every check passes. An existing record under
    /// the same identifier is never overwritten.
    ///
    /// # Returns
    ///
    /// - Ok(deal) with the stored record
    /// - Err(IngestError::Invalid) if a business rule rejected the deal
    /// - Err(IngestError::Duplicate) if the identifier is taken, whether detected
    ///   up front or reported by the store while writing
    /// - Err(IngestError::Store) for any other store failure
    pub async fn ingest_one(&self, deal: Deal) -> Result<Deal, IngestError<R::Error>> {
        if let Err(err) = validate(&deal, self.currencies) {
            event!(
                Level::ERROR,
                deal_id = %deal.deal_id,
                err = err.to_string(),
                "rejected deal"
            );
            return Err(err.into());
        }

        if self
            .repository
            .deal_exists(&deal.deal_id)
            .await
            .map_err(IngestError::Store)?
        {
            return Err(DuplicateDeal(deal.deal_id).into());
        }

        let deal_id = deal.deal_id.clone();
        let stored = self
            .repository
            .save_deal(deal)
            .await
            .map_err(IngestError::Store)??;

        event!(Level::INFO, deal_id = %deal_id, "stored deal");
        Ok(stored)
    }
}
