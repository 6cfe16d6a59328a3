use fxw_core::{iso4217::Iso4217, models::Deal, ports::Application};
use fxw_sqlite::{Db, config::SqliteConfig};

pub struct TestApp(pub Db);

impl TestApp {
    pub async fn open() -> anyhow::Result<Self> {
        Ok(Self(Db::open(&SqliteConfig::default()).await?))
    }
}

impl Application for TestApp {
    type Repository = Db;
    type Currencies = Iso4217;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn currencies(&self) -> &Self::Currencies {
        &Iso4217
    }
}

pub fn deal(id: &str, from: &str, to: &str, timestamp: &str, amount: f64) -> Deal {
    Deal {
        deal_id: id.into(),
        from_currency_iso: from.to_owned(),
        to_currency_iso: to.to_owned(),
        deal_timestamp: timestamp.parse().unwrap(),
        deal_amount: amount,
    }
}
