use chrono::{DateTime, Local};
use derive_getters::Getters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionCategory {
    Shopping,
    Food,
    Transport,
    Entertainment,
    Transfer,
    Other,
}

impl TransactionCategory {
    pub fn of(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "SHOPPING" => TransactionCategory::Shopping,
            "FOOD" => TransactionCategory::Food,
            "TRANSPORT" => TransactionCategory::Transport,
            "ENTERTAINMENT" => TransactionCategory::Entertainment,
            "TRANSFER" => TransactionCategory::Transfer,
            _ => TransactionCategory::Other,
        }
    }
}

#[derive(Getters, Debug, Clone, PartialEq)]
pub struct Transaction {
    id: String,
    card_id: String,
    category: TransactionCategory,
    title: String,
    amount: String,
    currency: String,
    created_at: DateTime<Local>,
}

impl Transaction {
    pub fn new(
        id: String,
        card_id: String,
        category: TransactionCategory,
        title: String,
        amount: String,
        currency: String,
        created_at: DateTime<Local>,
    ) -> Self {
        Self { id, card_id, category, title, amount, currency, created_at }
    }

    /// Outgoing amount as shown in statements, e.g. `-12.40 AZN`.
    pub fn formatted_amount(&self) -> String {
        format!("-{} {}", self.amount, self.currency)
    }
}

#[test]
fn test_formatted_amount() {
    let transaction = Transaction::new(
        "t1".into(),
        "c1".into(),
        TransactionCategory::of("food"),
        "Coffee".into(),
        "4.20".into(),
        "AZN".into(),
        Local::now(),
    );
    assert_eq!(transaction.formatted_amount(), "-4.20 AZN");
    assert_eq!(*transaction.category(), TransactionCategory::Food);
}
