//! The production application: the SQLite deal store and the ISO-4217 table.

use fxw_core::{iso4217::Iso4217, ports::Application};
use fxw_sqlite::Db;

/// Binds the SQLite deal store to the built-in currency registry.
#[derive(Clone)]
pub struct WarehouseApp {
    /// The deal store
    pub db: Db,
}

impl Application for WarehouseApp {
    type Repository = Db;
    type Currencies = Iso4217;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn currencies(&self) -> &Self::Currencies {
        &Iso4217
    }
}
