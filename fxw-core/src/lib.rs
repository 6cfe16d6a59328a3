#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the fxw-core crate.
//! [fxw_core]: https://docs.rs/fxw_core/latest/fxw_core/index.html
//! [fxw_sqlite]: https://docs.rs/fxw_sqlite/latest/fxw_sqlite/index.html
//! [fxw_axum]: https://docs.rs/fxw_axum/latest/fxw_axum/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the deal warehouse.
///
/// This module contains the deal record and its constituent value types. The
/// models are plain data: validation lives in [`validation`], persistence
/// behind the traits in [`ports`].
pub mod models;

/// Interface traits for the deal warehouse.
///
/// This module contains the "ports" in the hexagonal architecture pattern: the
/// deal store, the currency registry and the line source the batch pipeline
/// reads from. Adapters (SQLite, HTTP bodies, files) implement these without
/// the core knowing about them.
pub mod ports;

pub mod ingest;
pub mod iso4217;
pub mod validation;
