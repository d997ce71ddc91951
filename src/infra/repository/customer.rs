use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::StreamExt;
use tracing::{info, instrument};

use crate::domain::models::Customer;
use crate::domain::ports::repositories::{CustomerRepository, FaultStream};
use crate::infra::network::api::CustomerApi;
use crate::infra::storage::customer::{CustomerLocalDataSource, CustomerRow};
use crate::shared::errors::Fault;

pub struct CustomerRepositoryImpl {
    api: Arc<dyn CustomerApi>,
    customer_local_data_source: Arc<dyn CustomerLocalDataSource>,
}

impl CustomerRepositoryImpl {
    pub fn new(api: Arc<dyn CustomerApi>, customer_local_data_source: Arc<dyn CustomerLocalDataSource>) -> Self {
        Self { api, customer_local_data_source }
    }
}

#[async_trait]
impl CustomerRepository for CustomerRepositoryImpl {
    fn observe_customers(&self) -> FaultStream<Vec<Customer>> {
        self.customer_local_data_source
            .observe_customers()
            .map(|rows| Ok(rows.into_iter().map(Customer::from).collect()))
            .boxed()
    }

    #[instrument(name = "sync_customers", skip(self))]
    async fn sync_customers(&self) -> Result<(), Fault> {
        let customer_id = self.customer_local_data_source.customer_id()?;
        let customer = self.api.get_customer(&customer_id).await?;
        self.customer_local_data_source.insert_customers(vec![CustomerRow::from(customer)]).await?;
        info!(customer_id = %customer_id, "Customer synchronised.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repository::fakes::{customer_dto, FakeApi};
    use crate::infra::storage::{customer::FsCustomerLocalDataSource, memory_operator};

    async fn repository(api: FakeApi, customer_id: Option<&str>) -> anyhow::Result<CustomerRepositoryImpl> {
        let local = FsCustomerLocalDataSource::open(memory_operator()?, customer_id.map(str::to_owned)).await?;
        Ok(CustomerRepositoryImpl::new(Arc::new(api), Arc::new(local)))
    }

    #[tokio::test]
    async fn sync_stores_the_remote_customer() -> anyhow::Result<()> {
        let api = FakeApi::default().with_customer(customer_dto("42", "Leyla"));
        let repository = repository(api.clone(), Some("42")).await?;

        let mut customers = repository.observe_customers();
        assert_eq!(customers.next().await.transpose()?, Some(Vec::new()));

        repository.sync_customers().await?;
        let synced = customers.next().await.transpose()?.unwrap_or_default();
        assert_eq!(synced.len(), 1);
        assert_eq!(synced[0].name(), "Leyla");
        assert_eq!(api.requests(), vec!["customer:42".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn sync_without_customer_id_never_calls_remote() -> anyhow::Result<()> {
        let api = FakeApi::default();
        let repository = repository(api.clone(), None).await?;

        assert!(matches!(repository.sync_customers().await, Err(Fault::Fatal(_))));
        assert!(api.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn remote_faults_are_returned_unconverted() -> anyhow::Result<()> {
        let api = FakeApi::default().failing_with(401);
        let repository = repository(api, Some("42")).await?;

        let fault = repository.sync_customers().await.err();
        assert!(matches!(fault, Some(Fault::ClientRequest { status: 401, .. })));
        Ok(())
    }
}
