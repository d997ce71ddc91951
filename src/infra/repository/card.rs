use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::StreamExt;
use tracing::{info, instrument};

use crate::domain::models::Card;
use crate::domain::ports::repositories::{CardRepository, FaultStream};
use crate::infra::network::api::CardApi;
use crate::infra::storage::card::{CardLocalDataSource, CardRow};
use crate::infra::storage::customer::CustomerLocalDataSource;
use crate::shared::errors::Fault;

pub struct CardRepositoryImpl {
    api: Arc<dyn CardApi>,
    customer_local_data_source: Arc<dyn CustomerLocalDataSource>,
    card_local_data_source: Arc<dyn CardLocalDataSource>,
}

impl CardRepositoryImpl {
    pub fn new(
        api: Arc<dyn CardApi>,
        customer_local_data_source: Arc<dyn CustomerLocalDataSource>,
        card_local_data_source: Arc<dyn CardLocalDataSource>,
    ) -> Self {
        Self { api, customer_local_data_source, card_local_data_source }
    }
}

#[async_trait]
impl CardRepository for CardRepositoryImpl {
    fn observe_cards(&self) -> FaultStream<Vec<Card>> {
        self.card_local_data_source
            .observe_cards()
            .map(|rows| Ok(rows.into_iter().map(Card::from).collect()))
            .boxed()
    }

    #[instrument(name = "sync_cards", skip(self))]
    async fn sync_cards(&self) -> Result<(), Fault> {
        let customer_id = self.customer_local_data_source.customer_id()?;
        let cards = self.api.get_cards(&customer_id).await?;
        let count = cards.len();
        self.card_local_data_source
            .insert_cards(cards.into_iter().map(CardRow::from).collect())
            .await?;
        info!(customer_id = %customer_id, count, "Cards synchronised.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repository::fakes::{card_dto, FakeApi};
    use crate::infra::storage::{card::FsCardLocalDataSource, customer::FsCustomerLocalDataSource, memory_operator};

    #[tokio::test]
    async fn sync_upserts_cards_for_the_active_customer() -> anyhow::Result<()> {
        let op = memory_operator()?;
        let api = FakeApi::default().with_cards(vec![card_dto("c1", "4169-7388-1234-0001"), card_dto("c2", "4169-7388-1234-0002")]);
        let repository = CardRepositoryImpl::new(
            Arc::new(api.clone()),
            Arc::new(FsCustomerLocalDataSource::open(op.clone(), Some("42".into())).await?),
            Arc::new(FsCardLocalDataSource::open(op).await?),
        );

        repository.sync_cards().await?;
        repository.sync_cards().await?;

        let cards = repository.observe_cards().next().await.transpose()?.unwrap_or_default();
        let pans: Vec<String> = cards.iter().map(Card::last_pan_digits).collect();
        assert_eq!(pans, vec!["*0001".to_string(), "*0002".to_string()]);
        assert_eq!(api.requests(), vec!["cards:42".to_string(), "cards:42".to_string()]);
        Ok(())
    }
}
