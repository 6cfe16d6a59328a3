use fxw_core::{iso4217::Iso4217, ports::Application};
use fxw_sqlite::{Db, config::SqliteConfig};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl TestApp {
    pub async fn open() -> Self {
        Self(Db::open(&SqliteConfig::default()).await.unwrap())
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
