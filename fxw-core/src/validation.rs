//! Business rules for accepting a deal.
//!
//! [`validate`] is a pure function: it reads the candidate and the currency
//! registry, and nothing else. The checks run in a fixed order and the first
//! failing rule is the only one reported.

use crate::{
    models::{Deal, DealTimestamp},
    ports::CurrencyRegistry,
};
use thiserror::Error;
use time::macros::datetime;

/// The earliest trading date the warehouse recognizes (inclusive)
pub const MINIMUM_DEAL_TIMESTAMP: DealTimestamp = DealTimestamp::new(datetime!(1982-01-01 0:00));

/// The reasons a candidate deal can be rejected
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", content = "value", rename_all = "snake_case")
)]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A currency code does not resolve in the registry
    #[error("invalid currency ISO: {0}")]
    InvalidCurrency(String),

    /// Source and target currency are the same
    #[error("same currency conversion not allowed: {0}")]
    SameCurrency(String),

    /// The amount is zero, negative or NaN
    #[error("invalid deal amount: {0}")]
    NonPositiveAmount(f64),

    /// The deal predates the minimum trading date
    #[error("timestamp before minimum allowed date: {0}")]
    TimestampTooEarly(DealTimestamp),
}

/// Decide whether `deal` is acceptable.
///
/// Checks, in order:
/// 1. both currency codes are known to `currencies`
/// 2. the currencies differ
/// 3. the amount is strictly positive
/// 4. the timestamp is on or after [`MINIMUM_DEAL_TIMESTAMP`]
pub fn validate(deal: &Deal, currencies: &impl CurrencyRegistry) -> Result<(), ValidationError> {
    let Deal {
        from_currency_iso: from,
        to_currency_iso: to,
        deal_timestamp,
        deal_amount,
        ..
    } = deal;

    let from_known = currencies.is_known(from);

    // The target is only blamed when the source itself checks out
    let blame = || (if from_known { to } else { from }).clone();

    if !from_known || !currencies.is_known(to) {
        return Err(ValidationError::InvalidCurrency(blame()));
    }

    if from == to {
        return Err(ValidationError::SameCurrency(blame()));
    }

    // NaN compares false, so it is rejected here as well
    if !(*deal_amount > 0.0) {
        return Err(ValidationError::NonPositiveAmount(*deal_amount));
    }

    if *deal_timestamp < MINIMUM_DEAL_TIMESTAMP {
        return Err(ValidationError::TimestampTooEarly(*deal_timestamp));
    }

    Ok(())
}
