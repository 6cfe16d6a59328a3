use super::DealTimestamp;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The delimiter separating the fields of a batch row
pub const FIELD_DELIMITER: char = ',';

/// The number of positional fields in a batch row
pub const FIELD_COUNT: usize = 5;

/// The caller-assigned identifier of a deal.
///
/// The identifier space is flat; the store enforces uniqueness.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DealId(pub String);

impl DealId {
    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DealId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DealId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<DealId> for String {
    fn from(value: DealId) -> Self {
        value.0
    }
}

impl Display for DealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recorded foreign-exchange deal.
///
/// A `Deal` is only ever a candidate until it has passed [`crate::validation::validate`]
/// and been written by the [`crate::ingest::Ingestor`]. The currency codes are kept
/// as raw strings so that an unknown code can be reported back verbatim.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    /// Unique identifier of the deal
    #[cfg_attr(feature = "serde", serde(rename = "dealId"))]
    pub deal_id: DealId,

    /// ISO-4217 code of the currency being sold
    #[cfg_attr(feature = "serde", serde(rename = "fromCurrencyISO"))]
    pub from_currency_iso: String,

    /// ISO-4217 code of the currency being bought
    #[cfg_attr(feature = "serde", serde(rename = "toCurrencyISO"))]
    pub to_currency_iso: String,

    /// When the deal was struck
    #[cfg_attr(feature = "serde", serde(rename = "dealTimestamp"))]
    pub deal_timestamp: DealTimestamp,

    /// The amount of the deal, expressed in the source currency
    #[cfg_attr(feature = "serde", serde(rename = "dealAmount"))]
    pub deal_amount: f64,
}

/// The ways in which a batch row can fail to describe a deal
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The row did not split into the expected number of fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// The number of fields a row must have
        expected: usize,
        /// The number of fields the row actually had
        found: usize,
    },

    /// The timestamp field is not a recognized date-time
    #[error("unparseable timestamp: {value}")]
    Timestamp {
        /// The offending field
        value: String,
    },

    /// The amount field is not a finite number
    #[error("unparseable amount: {value}")]
    Amount {
        /// The offending field
        value: String,
    },
}

impl FromStr for Deal {
    type Err = ParseError;

    /// Parse a delimited batch row of the form
    /// `identifier,sourceCurrency,targetCurrency,timestamp,amount`.
    fn from_str(row: &str) -> Result<Self, Self::Err> {
        let fields = row.split(FIELD_DELIMITER).map(str::trim).collect::<Vec<_>>();

        let [deal_id, from, to, timestamp, amount] = fields[..] else {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        };

        let deal_timestamp = timestamp.parse().map_err(|_| ParseError::Timestamp {
            value: timestamp.to_owned(),
        })?;

        let deal_amount = amount
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ParseError::Amount {
                value: amount.to_owned(),
            })?;

        Ok(Self {
            deal_id: deal_id.into(),
            from_currency_iso: from.to_owned(),
            to_currency_iso: to.to_owned(),
            deal_timestamp,
            deal_amount,
        })
    }
}
