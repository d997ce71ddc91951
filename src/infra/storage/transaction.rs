use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use opendal::Operator;
use serde::{Deserialize, Serialize};

use super::table::{JsonTable, Row};
use crate::domain::models::{Transaction, TransactionCategory};
use crate::infra::network::dto::TransactionRemoteDto;
use crate::shared::errors::Fault;
use crate::utils::parse_timestamp;

pub const TRANSACTION_TABLE: &str = "transaction-db/transactions.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub card_id: String,
    pub category: String,
    pub title: String,
    pub amount: String,
    pub currency: String,
    pub created_at: String,
}

impl Row for TransactionRow {
    fn key(&self) -> &str {
        &self.id
    }
}

impl From<TransactionRemoteDto> for TransactionRow {
    fn from(dto: TransactionRemoteDto) -> Self {
        Self {
            id: dto.id,
            card_id: dto.card_id,
            category: dto.category,
            title: dto.title,
            amount: dto.amount,
            currency: dto.currency,
            created_at: dto.created_at,
        }
    }
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction::new(
            row.id,
            row.card_id,
            TransactionCategory::of(&row.category),
            row.title,
            row.amount,
            row.currency,
            parse_timestamp(&row.created_at),
        )
    }
}

#[async_trait]
pub trait TransactionLocalDataSource: Send + Sync {
    /// Live view of one card's transactions.
    fn observe_transactions(&self, card_id: &str) -> BoxStream<'static, Vec<TransactionRow>>;
    async fn insert_transactions(&self, transactions: Vec<TransactionRow>) -> Result<(), Fault>;
}

pub struct FsTransactionLocalDataSource {
    table: JsonTable<TransactionRow>,
}

impl FsTransactionLocalDataSource {
    pub async fn open(op: Operator) -> Result<Self, Fault> {
        Ok(Self { table: JsonTable::open(op, TRANSACTION_TABLE.into()).await? })
    }
}

#[async_trait]
impl TransactionLocalDataSource for FsTransactionLocalDataSource {
    fn observe_transactions(&self, card_id: &str) -> BoxStream<'static, Vec<TransactionRow>> {
        let card_id = card_id.to_owned();
        self.table
            .watch()
            .map(move |rows| rows.into_iter().filter(|row| row.card_id == card_id).collect())
            .boxed()
    }

    async fn insert_transactions(&self, transactions: Vec<TransactionRow>) -> Result<(), Fault> {
        self.table.upsert(transactions).await
    }
}

#[cfg(test)]
mod tests {
    use opendal::services;

    use super::*;

    fn row(id: &str, card_id: &str) -> TransactionRow {
        TransactionRow {
            id: id.into(),
            card_id: card_id.into(),
            category: "FOOD".into(),
            title: "Lunch".into(),
            amount: "9.00".into(),
            currency: "AZN".into(),
            created_at: "2024-05-02T12:30:00Z".into(),
        }
    }

    #[tokio::test]
    async fn observe_filters_by_card() -> anyhow::Result<()> {
        let op = Operator::new(services::Memory::default())?.finish();
        let source = FsTransactionLocalDataSource::open(op).await?;
        source.insert_transactions(vec![row("t1", "c1"), row("t2", "c2"), row("t3", "c1")]).await?;

        let first = source.observe_transactions("c1").next().await.unwrap_or_default();
        let ids: Vec<&str> = first.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
        Ok(())
    }
}
