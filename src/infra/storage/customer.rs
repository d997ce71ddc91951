use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use opendal::Operator;
use serde::{Deserialize, Serialize};

use super::table::{JsonTable, Row};
use crate::domain::models::Customer;
use crate::infra::network::dto::CustomerRemoteDto;
use crate::shared::errors::Fault;
use crate::utils::parse_timestamp;

pub const CUSTOMER_TABLE: &str = "customer-db/customers.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub created_at: String,
}

impl Row for CustomerRow {
    fn key(&self) -> &str {
        &self.id
    }
}

impl From<CustomerRemoteDto> for CustomerRow {
    fn from(dto: CustomerRemoteDto) -> Self {
        Self { id: dto.id, name: dto.name, phone: dto.phone, created_at: dto.created_at }
    }
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        let created_at = parse_timestamp(&row.created_at);
        Customer::new(row.id, row.name, row.phone, created_at)
    }
}

#[async_trait]
pub trait CustomerLocalDataSource: Send + Sync {
    /// Id of the customer this installation works for.
    fn customer_id(&self) -> Result<String, Fault>;
    fn observe_customers(&self) -> BoxStream<'static, Vec<CustomerRow>>;
    async fn insert_customers(&self, customers: Vec<CustomerRow>) -> Result<(), Fault>;
}

pub struct FsCustomerLocalDataSource {
    table: JsonTable<CustomerRow>,
    customer_id: Option<String>,
}

impl FsCustomerLocalDataSource {
    pub async fn open(op: Operator, customer_id: Option<String>) -> Result<Self, Fault> {
        let table = JsonTable::open(op, CUSTOMER_TABLE.into()).await?;
        Ok(Self { table, customer_id })
    }
}

#[async_trait]
impl CustomerLocalDataSource for FsCustomerLocalDataSource {
    fn customer_id(&self) -> Result<String, Fault> {
        self.customer_id.clone().ok_or_else(|| {
            Fault::Fatal("No active customer, pass --customer-id or set TELLER_CUSTOMER_ID.".into())
        })
    }

    fn observe_customers(&self) -> BoxStream<'static, Vec<CustomerRow>> {
        self.table.watch().boxed()
    }

    async fn insert_customers(&self, customers: Vec<CustomerRow>) -> Result<(), Fault> {
        self.table.upsert(customers).await
    }
}
