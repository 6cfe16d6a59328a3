use fxw_core::{
    iso4217::Iso4217,
    models::{Deal, DealId},
    ports::{Application, DealRepository, DuplicateDeal},
};
use indexmap::IndexMap;
use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

type Map<K, V> = IndexMap<K, V, rustc_hash::FxBuildHasher>;

#[derive(Debug, thiserror::Error)]
#[error("store is offline")]
pub struct Offline;

// A deal store backed by an insertion-ordered map. The failure switches let
// tests reproduce an unavailable store and the check-then-write race.
#[derive(Default)]
pub struct MemoryRepository {
    deals: Mutex<Map<DealId, Deal>>,
    pub offline: AtomicBool,
    pub blind_exists: AtomicBool,
}

impl MemoryRepository {
    pub fn with_deals(deals: impl IntoIterator<Item = Deal>) -> Self {
        let repository = Self::default();
        repository.deals.lock().unwrap().extend(
            deals
                .into_iter()
                .map(|deal| (deal.deal_id.clone(), deal)),
        );
        repository
    }

    pub fn len(&self) -> usize {
        self.deals.lock().unwrap().len()
    }

    pub fn get(&self, deal_id: &str) -> Option<Deal> {
        self.deals.lock().unwrap().get(&DealId::from(deal_id)).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.deals
            .lock()
            .unwrap()
            .keys()
            .map(|id| id.to_string())
            .collect()
    }

    fn check(&self) -> Result<(), Offline> {
        if self.offline.load(Ordering::SeqCst) {
            Err(Offline)
        } else {
            Ok(())
        }
    }
}

impl DealRepository for MemoryRepository {
    type Error = Offline;

    async fn deal_exists(&self, deal_id: &DealId) -> Result<bool, Self::Error> {
        self.check()?;
        if self.blind_exists.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.deals.lock().unwrap().contains_key(deal_id))
    }

    async fn save_deal(&self, deal: Deal) -> Result<Result<Deal, DuplicateDeal>, Self::Error> {
        self.check()?;
        let mut deals = self.deals.lock().unwrap();
        if deals.contains_key(&deal.deal_id) {
            return Ok(Err(DuplicateDeal(deal.deal_id)));
        }
        deals.insert(deal.deal_id.clone(), deal.clone());
        Ok(Ok(deal))
    }

    async fn get_deal(&self, deal_id: &DealId) -> Result<Option<Deal>, Self::Error> {
        self.check()?;
        Ok(self.deals.lock().unwrap().get(deal_id).cloned())
    }

    async fn list_deals(&self) -> Result<Vec<Deal>, Self::Error> {
        self.check()?;
        Ok(self.deals.lock().unwrap().values().cloned().collect())
    }
}

pub struct TestApp(pub MemoryRepository);

impl Application for TestApp {
    type Repository = MemoryRepository;
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
