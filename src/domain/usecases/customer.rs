use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::StreamExt;

use super::base::{BaseFlowUseCase, BaseUseCase, UseCaseRuntime};
use crate::domain::models::Customer;
use crate::domain::ports::repositories::{CustomerRepository, FaultStream};
use crate::shared::errors::Fault;

/// Refreshes the active customer from the API.
#[derive(Clone)]
pub struct SyncCustomersUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn CustomerRepository>,
}

impl SyncCustomersUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn CustomerRepository>) -> Self {
        Self { runtime, repository }
    }
}

#[async_trait]
impl BaseUseCase for SyncCustomersUseCase {
    type Params = ();
    type Output = ();

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, _: ()) -> Result<(), Fault> {
        self.repository.sync_customers().await
    }
}

/// Emits the stored customer, and again whenever it changes. Nothing is
/// emitted while the table is empty.
#[derive(Clone)]
pub struct ObserveCustomerUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn CustomerRepository>,
}

impl ObserveCustomerUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn CustomerRepository>) -> Self {
        Self { runtime, repository }
    }
}

impl BaseFlowUseCase for ObserveCustomerUseCase {
    type Params = ();
    type Output = Customer;

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    fn create_flow(&self, _: ()) -> FaultStream<Customer> {
        self.repository
            .observe_customers()
            .filter_map(|customers| async move {
                match customers {
                    Ok(customers) => customers.into_iter().next().map(Ok),
                    Err(fault) => Some(Err(fault)),
                }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::errors::{AppError, ServerError};
    use crate::domain::usecases::testing::remote_runtime;
    use crate::infra::repository::customer::CustomerRepositoryImpl;
    use crate::infra::repository::fakes::{customer_dto, FakeApi};
    use crate::infra::storage::{customer::FsCustomerLocalDataSource, memory_operator};

    async fn repository(api: FakeApi) -> anyhow::Result<Arc<dyn CustomerRepository>> {
        let local = FsCustomerLocalDataSource::open(memory_operator()?, Some("42".into())).await?;
        Ok(Arc::new(CustomerRepositoryImpl::new(Arc::new(api), Arc::new(local))))
    }

    #[tokio::test]
    async fn observer_waits_for_the_first_sync() -> anyhow::Result<()> {
        let repository = repository(FakeApi::default().with_customer(customer_dto("42", "Leyla"))).await?;
        let sync = SyncCustomersUseCase::new(remote_runtime(), Arc::clone(&repository));
        let observe = ObserveCustomerUseCase::new(remote_runtime(), repository);

        let mut customers = observe.observe(());
        let nothing_yet = tokio::time::timeout(Duration::from_millis(50), customers.next()).await;
        assert!(nothing_yet.is_err());

        sync.execute(()).await?;
        let customer = customers.next().await.transpose()?;
        assert_eq!(customer.as_ref().map(Customer::name).map(String::as_str), Some("Leyla"));
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_sync_is_converted() -> anyhow::Result<()> {
        let sync = SyncCustomersUseCase::new(remote_runtime(), repository(FakeApi::default().failing_with(401)).await?);

        let err = sync.execute(()).await.err();
        assert!(matches!(
            err.as_ref().and_then(AppError::as_server),
            Some(ServerError::NotAuthorized { .. })
        ));
        Ok(())
    }
}
