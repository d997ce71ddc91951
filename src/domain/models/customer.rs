use chrono::{DateTime, Local};
use derive_getters::Getters;

/// A bank customer as cached locally.
#[derive(Getters, Debug, Clone, PartialEq)]
pub struct Customer {
    id: String,
    name: String,
    phone: String,
    created_at: DateTime<Local>,
}

impl Customer {
    pub fn new(id: String, name: String, phone: String, created_at: DateTime<Local>) -> Self {
        Self { id, name, phone, created_at }
    }
}
