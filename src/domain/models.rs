pub mod card;
pub mod customer;
pub mod settings;
pub mod transaction;

pub use card::{Card, CardStatus, CardType, Currency};
pub use customer::Customer;
pub use settings::{AppLanguage, SplashStatus};
pub use transaction::{Transaction, TransactionCategory};
