use serde::{Deserialize, Serialize};

/// Problem description some error responses carry: `{ "code": .., "message": .. }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerProblemDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServerProblemDescription {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self { code: Some(code.into()), message: None }
    }

    /// Unknown fields are ignored, missing ones stay unset and anything that
    /// doesn't decode yields the empty description.
    pub fn parse_lenient(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRemoteDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRemoteDto {
    pub id: String,
    pub customer_id: String,
    pub currency: String,
    pub status: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub balance: f64,
    pub pan: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRemoteDto {
    pub id: String,
    pub card_id: String,
    pub category: String,
    pub title: String,
    pub amount: String,
    pub currency: String,
    pub created_at: String,
}
