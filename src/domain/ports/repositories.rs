use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::models::{AppLanguage, Card, Customer, Transaction};
use crate::shared::errors::Fault;

/// Live view that may end with a single fault.
pub type FaultStream<T> = BoxStream<'static, Result<T, Fault>>;

/// `sync_*` fetches from the remote API and upserts into local storage.
/// `observe_*` only ever reads local storage.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    fn observe_customers(&self) -> FaultStream<Vec<Customer>>;
    async fn sync_customers(&self) -> Result<(), Fault>;
}

#[async_trait]
pub trait CardRepository: Send + Sync {
    fn observe_cards(&self) -> FaultStream<Vec<Card>>;
    async fn sync_cards(&self) -> Result<(), Fault>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    fn observe_transactions(&self, card_id: &str) -> FaultStream<Vec<Transaction>>;
    async fn sync_transactions(&self, card_id: &str) -> Result<(), Fault>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, phone: &str) -> Result<(), Fault>;
    async fn registered_phone(&self) -> Result<Option<String>, Fault>;
}

/// Raises a synthetic HTTP fault so the error pipeline can be exercised.
#[async_trait]
pub trait ErrorConverterRepository: Send + Sync {
    async fn get_error(&self, code: u16, identifier: &str) -> Result<(), Fault>;
}

#[async_trait]
pub trait AppSettingsDataSource: Send + Sync {
    async fn get_app_language(&self) -> Result<AppLanguage, Fault>;
    async fn set_app_language(&self, language: AppLanguage) -> Result<(), Fault>;
    fn observe_language(&self) -> FaultStream<AppLanguage>;
}
