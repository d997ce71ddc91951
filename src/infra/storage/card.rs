use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use opendal::Operator;
use serde::{Deserialize, Serialize};

use super::table::{JsonTable, Row};
use crate::domain::models::{Card, CardStatus, CardType, Currency};
use crate::infra::network::dto::CardRemoteDto;
use crate::shared::errors::Fault;
use crate::utils::parse_timestamp;

pub const CARD_TABLE: &str = "card-db/cards.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRow {
    pub id: String,
    pub customer_id: String,
    pub currency: String,
    pub status: String,
    pub card_type: String,
    pub balance: f64,
    pub pan: String,
    pub created_at: String,
}

impl Row for CardRow {
    fn key(&self) -> &str {
        &self.id
    }
}

impl From<CardRemoteDto> for CardRow {
    fn from(dto: CardRemoteDto) -> Self {
        Self {
            id: dto.id,
            customer_id: dto.customer_id,
            currency: dto.currency,
            status: dto.status,
            card_type: dto.card_type,
            balance: dto.balance,
            pan: dto.pan,
            created_at: dto.created_at,
        }
    }
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Card::new(
            row.id,
            row.customer_id,
            Currency::of(&row.currency),
            CardStatus::of(&row.status),
            CardType::of(&row.card_type),
            row.balance,
            row.pan,
            parse_timestamp(&row.created_at),
        )
    }
}

#[async_trait]
pub trait CardLocalDataSource: Send + Sync {
    fn observe_cards(&self) -> BoxStream<'static, Vec<CardRow>>;
    async fn insert_cards(&self, cards: Vec<CardRow>) -> Result<(), Fault>;
}

pub struct FsCardLocalDataSource {
    table: JsonTable<CardRow>,
}

impl FsCardLocalDataSource {
    pub async fn open(op: Operator) -> Result<Self, Fault> {
        Ok(Self { table: JsonTable::open(op, CARD_TABLE.into()).await? })
    }
}

#[async_trait]
impl CardLocalDataSource for FsCardLocalDataSource {
    fn observe_cards(&self) -> BoxStream<'static, Vec<CardRow>> {
        self.table.watch().boxed()
    }

    async fn insert_cards(&self, cards: Vec<CardRow>) -> Result<(), Fault> {
        self.table.upsert(cards).await
    }
}
