use async_trait::async_trait;
use tracing::instrument;

use super::dto::{CardRemoteDto, CustomerRemoteDto, TransactionRemoteDto};
use super::http_adapter::HttpAdapter;
use crate::shared::errors::Fault;

#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn get_customer(&self, customer_id: &str) -> Result<CustomerRemoteDto, Fault>;
}

#[async_trait]
pub trait CardApi: Send + Sync {
    async fn get_cards(&self, customer_id: &str) -> Result<Vec<CardRemoteDto>, Fault>;
}

#[async_trait]
pub trait TransactionApi: Send + Sync {
    async fn get_transactions(
        &self,
        customer_id: &str,
        card_id: &str,
    ) -> Result<Vec<TransactionRemoteDto>, Fault>;
}

pub struct CustomerApiService {
    http: HttpAdapter,
}

impl CustomerApiService {
    pub fn new(http: HttpAdapter) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CustomerApi for CustomerApiService {
    #[instrument(name = "api_get_customer", skip(self))]
    async fn get_customer(&self, customer_id: &str) -> Result<CustomerRemoteDto, Fault> {
        self.http.get_json(&format!("pb/v1/customers/{customer_id}")).await
    }
}

pub struct CardApiService {
    http: HttpAdapter,
}

impl CardApiService {
    pub fn new(http: HttpAdapter) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CardApi for CardApiService {
    #[instrument(name = "api_get_cards", skip(self))]
    async fn get_cards(&self, customer_id: &str) -> Result<Vec<CardRemoteDto>, Fault> {
        self.http.get_json(&format!("pb/v1/customers/{customer_id}/cards")).await
    }
}

pub struct TransactionApiService {
    http: HttpAdapter,
}

impl TransactionApiService {
    pub fn new(http: HttpAdapter) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TransactionApi for TransactionApiService {
    #[instrument(name = "api_get_transactions", skip(self))]
    async fn get_transactions(
        &self,
        customer_id: &str,
        card_id: &str,
    ) -> Result<Vec<TransactionRemoteDto>, Fault> {
        self.http
            .get_json(&format!("pb/v1/customers/{customer_id}/cards/{card_id}/transactions"))
            .await
    }
}
