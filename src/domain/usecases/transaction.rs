use std::sync::Arc;

use async_trait::async_trait;

use super::base::{BaseFlowUseCase, BaseUseCase, UseCaseRuntime};
use crate::domain::models::Transaction;
use crate::domain::ports::repositories::{FaultStream, TransactionRepository};
use crate::shared::errors::Fault;

/// Refreshes one card's transactions. Params: the card id.
#[derive(Clone)]
pub struct SyncTransactionsUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn TransactionRepository>,
}

impl SyncTransactionsUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn TransactionRepository>) -> Self {
        Self { runtime, repository }
    }
}

#[async_trait]
impl BaseUseCase for SyncTransactionsUseCase {
    type Params = String;
    type Output = ();

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, card_id: String) -> Result<(), Fault> {
        self.repository.sync_transactions(&card_id).await
    }
}

#[derive(Clone)]
pub struct ObserveTransactionsUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn TransactionRepository>,
}

impl ObserveTransactionsUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn TransactionRepository>) -> Self {
        Self { runtime, repository }
    }
}

impl BaseFlowUseCase for ObserveTransactionsUseCase {
    type Params = String;
    type Output = Vec<Transaction>;

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    fn create_flow(&self, card_id: String) -> FaultStream<Vec<Transaction>> {
        self.repository.observe_transactions(&card_id)
    }
}
