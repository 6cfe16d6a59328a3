use std::{fmt::Display, str::FromStr};
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

// Parsing accepts an optional fraction; formatting always writes at least one digit
const PARSE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

/// The moment a deal was struck.
///
/// Deal timestamps carry no offset: they are recorded exactly as the counterparty
/// reported them, with sub-second precision. Both the ISO-8601 form
/// (`2024-02-20T14:17:19.924`) and the SQL form (`2024-02-20 14:17:19.924`) are
/// accepted when parsing; the ISO-8601 form is always used when rendering.
///
/// # Examples
///
/// ```
/// # use fxw_core::models::DealTimestamp;
/// let ts: DealTimestamp = "2024-02-20 14:17:19.924".parse().unwrap();
/// assert_eq!(ts.to_string(), "2024-02-20T14:17:19.924");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DealTimestamp(PrimitiveDateTime);

impl DealTimestamp {
    /// Wrap an existing datetime
    pub const fn new(value: PrimitiveDateTime) -> Self {
        Self(value)
    }

    /// The underlying datetime
    pub const fn value(&self) -> PrimitiveDateTime {
        self.0
    }
}

impl From<PrimitiveDateTime> for DealTimestamp {
    fn from(value: PrimitiveDateTime) -> Self {
        Self(value)
    }
}

impl From<DealTimestamp> for PrimitiveDateTime {
    fn from(value: DealTimestamp) -> Self {
        value.0
    }
}

impl FromStr for DealTimestamp {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The SQL form differs only in the date/time separator
        let normalized = match s.as_bytes().get(10) {
            Some(b' ') => {
                let mut owned = s.to_owned();
                owned.replace_range(10..11, "T");
                std::borrow::Cow::Owned(owned)
            }
            _ => std::borrow::Cow::Borrowed(s),
        };
        PrimitiveDateTime::parse(&normalized, PARSE_FORMAT).map(Self)
    }
}

impl Display for DealTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted = self.0.format(DISPLAY_FORMAT).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl TryFrom<String> for DealTimestamp {
    type Error = time::error::Parse;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DealTimestamp> for String {
    fn from(value: DealTimestamp) -> Self {
        value.to_string()
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DealTimestamp {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DealTimestamp".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "description": "A local date-time without offset, e.g. 2024-02-20T14:17:19.924",
        })
    }
}
