use super::{CurrencyRegistry, DealRepository};
use crate::ingest::Ingestor;

/// The application binds together the deal store and the currency registry.
///
/// Transports (HTTP, CLI) are written against this trait rather than against
/// concrete adapters, so that the same handlers work over SQLite in production
/// and over an in-memory store in tests.
pub trait Application {
    /// The deal store
    type Repository: DealRepository;

    /// The registry of known currency codes
    type Currencies: CurrencyRegistry;

    /// Get the deal store
    fn database(&self) -> &Self::Repository;

    /// Get the currency registry
    fn currencies(&self) -> &Self::Currencies;

    /// Construct an ingestion pipeline over this application's collaborators
    fn ingestor(&self) -> Ingestor<'_, Self::Repository, Self::Currencies> {
        Ingestor::new(self.database(), self.currencies())
    }
}
