use crate::models::{Deal, DealId};
use thiserror::Error;

/// The store already holds a deal under this identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("deal {0} already exists")]
pub struct DuplicateDeal(pub DealId);

/// Repository interface for deal storage and retrieval.
///
/// Deals are write-once: there is no update or delete path. The repository is
/// treated as an opaque key-value store keyed by [`DealId`], but it must
/// enforce uniqueness of that key itself. The existence check performed by the
/// ingestion pipeline and the subsequent write are not one atomic operation,
/// so `save_deal` is the backstop for concurrent writers racing on the same
/// identifier.
pub trait DealRepository {
    /// Error type for infrastructure failures (connection loss, I/O, ...)
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether a deal is already stored under `deal_id`.
    fn deal_exists(
        &self,
        deal_id: &DealId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Persist a new deal.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(deal)) with the stored record if the write succeeded
    /// - Ok(Err(DuplicateDeal)) if the identifier is already taken; nothing is written
    /// - Err(repository_error) if there is some other error
    fn save_deal(
        &self,
        deal: Deal,
    ) -> impl Future<Output = Result<Result<Deal, DuplicateDeal>, Self::Error>> + Send;

    /// Retrieve a deal by its identifier, returning Option::None if it does not exist.
    fn get_deal(
        &self,
        deal_id: &DealId,
    ) -> impl Future<Output = Result<Option<Deal>, Self::Error>> + Send;

    /// Retrieve every stored deal, in the order they were written.
    fn list_deals(&self) -> impl Future<Output = Result<Vec<Deal>, Self::Error>> + Send;
}
