//! [`DealRepository`] implementation for the SQLite database.

use crate::{Db, types::DealRow};
use fxw_core::{
    models::{Deal, DealId},
    ports::{DealRepository, DuplicateDeal},
};

impl DealRepository for Db {
    type Error = sqlx::Error;

    async fn deal_exists(&self, deal_id: &DealId) -> Result<bool, Self::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            select
                exists (select 1 from deal where deal_id = $1)
            "#,
        )
        .bind(deal_id.as_str())
        .fetch_one(&self.reader)
        .await
    }

    async fn save_deal(&self, deal: Deal) -> Result<Result<Deal, DuplicateDeal>, Self::Error> {
        let result = sqlx::query(
            r#"
            insert into
                deal (deal_id, from_currency_iso, to_currency_iso, deal_timestamp, deal_amount)
            values
                ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(deal.deal_id.as_str())
        .bind(deal.from_currency_iso.as_str())
        .bind(deal.to_currency_iso.as_str())
        .bind(deal.deal_timestamp.value())
        .bind(deal.deal_amount)
        .execute(&self.writer)
        .await;

        match result {
            Ok(_) => Ok(Ok(deal)),
            // the primary key rejected the insert: someone else got there first
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Ok(Err(DuplicateDeal(deal.deal_id)))
            }
            Err(err) => Err(err),
        }
    }

    async fn get_deal(&self, deal_id: &DealId) -> Result<Option<Deal>, Self::Error> {
        let row = sqlx::query_as::<_, DealRow>(
            r#"
            select
                deal_id, from_currency_iso, to_currency_iso, deal_timestamp, deal_amount
            from
                deal
            where
                deal_id = $1
            "#,
        )
        .bind(deal_id.as_str())
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_deals(&self) -> Result<Vec<Deal>, Self::Error> {
        let rows = sqlx::query_as::<_, DealRow>(
            r#"
            select
                deal_id, from_currency_iso, to_currency_iso, deal_timestamp, deal_amount
            from
                deal
            order by
                rowid
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
