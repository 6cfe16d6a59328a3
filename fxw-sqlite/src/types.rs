use fxw_core::models::Deal;
use time::PrimitiveDateTime;

/// A row of the `deal` table
#[derive(sqlx::FromRow)]
pub(crate) struct DealRow {
    pub deal_id: String,
    pub from_currency_iso: String,
    pub to_currency_iso: String,
    pub deal_timestamp: PrimitiveDateTime,
    pub deal_amount: f64,
}

impl From<DealRow> for Deal {
    fn from(row: DealRow) -> Self {
        Self {
            deal_id: row.deal_id.into(),
            from_currency_iso: row.from_currency_iso,
            to_currency_iso: row.to_currency_iso,
            deal_timestamp: row.deal_timestamp.into(),
            deal_amount: row.deal_amount,
        }
    }
}
