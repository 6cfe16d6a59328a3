mod deal;
mod timestamp;

pub use deal::{Deal, DealId, FIELD_COUNT, FIELD_DELIMITER, ParseError};
pub use timestamp::DealTimestamp;
