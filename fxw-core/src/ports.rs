mod application;
mod currency;
mod deal;
mod lines;

pub use application::Application;
pub use currency::CurrencyRegistry;
pub use deal::{DealRepository, DuplicateDeal};
pub use lines::{LineSource, TextLines};
