use std::sync::Arc;

use async_trait::async_trait;

use super::base::{BaseFlowUseCase, BaseUseCase, UseCaseRuntime};
use crate::domain::models::Card;
use crate::domain::ports::repositories::{CardRepository, FaultStream};
use crate::shared::errors::Fault;

#[derive(Clone)]
pub struct SyncCardsUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn CardRepository>,
}

impl SyncCardsUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn CardRepository>) -> Self {
        Self { runtime, repository }
    }
}

#[async_trait]
impl BaseUseCase for SyncCardsUseCase {
    type Params = ();
    type Output = ();

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, _: ()) -> Result<(), Fault> {
        self.repository.sync_cards().await
    }
}

#[derive(Clone)]
pub struct ObserveCardsUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn CardRepository>,
}

impl ObserveCardsUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn CardRepository>) -> Self {
        Self { runtime, repository }
    }
}

impl BaseFlowUseCase for ObserveCardsUseCase {
    type Params = ();
    type Output = Vec<Card>;

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    fn create_flow(&self, _: ()) -> FaultStream<Vec<Card>> {
        self.repository.observe_cards()
    }
}
