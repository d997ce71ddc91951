use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::StreamExt;
use tracing::{info, instrument};

use crate::domain::models::Transaction;
use crate::domain::ports::repositories::{FaultStream, TransactionRepository};
use crate::infra::network::api::TransactionApi;
use crate::infra::storage::customer::CustomerLocalDataSource;
use crate::infra::storage::transaction::{TransactionLocalDataSource, TransactionRow};
use crate::shared::errors::Fault;

pub struct TransactionRepositoryImpl {
    api: Arc<dyn TransactionApi>,
    customer_local_data_source: Arc<dyn CustomerLocalDataSource>,
    transaction_local_data_source: Arc<dyn TransactionLocalDataSource>,
}

impl TransactionRepositoryImpl {
    pub fn new(
        api: Arc<dyn TransactionApi>,
        customer_local_data_source: Arc<dyn CustomerLocalDataSource>,
        transaction_local_data_source: Arc<dyn TransactionLocalDataSource>,
    ) -> Self {
        Self { api, customer_local_data_source, transaction_local_data_source }
    }
}

#[async_trait]
impl TransactionRepository for TransactionRepositoryImpl {
    fn observe_transactions(&self, card_id: &str) -> FaultStream<Vec<Transaction>> {
        self.transaction_local_data_source
            .observe_transactions(card_id)
            .map(|rows| Ok(rows.into_iter().map(Transaction::from).collect()))
            .boxed()
    }

    #[instrument(name = "sync_transactions", skip(self))]
    async fn sync_transactions(&self, card_id: &str) -> Result<(), Fault> {
        let customer_id = self.customer_local_data_source.customer_id()?;
        let transactions = self.api.get_transactions(&customer_id, card_id).await?;
        let count = transactions.len();
        self.transaction_local_data_source
            .insert_transactions(transactions.into_iter().map(TransactionRow::from).collect())
            .await?;
        info!(customer_id = %customer_id, count, "Transactions synchronised.");
        Ok(())
    }
}
