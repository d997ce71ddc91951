use std::fmt;

use chrono::{DateTime, Local};
use derive_getters::Getters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Azn,
    Usd,
    Eur,
    Gbp,
    Unknown,
}

impl Currency {
    pub fn of(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "AZN" => Currency::Azn,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            _ => Currency::Unknown,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::Azn => "AZN",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Unknown => "???",
        };
        f.write_str(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
}

impl CardStatus {
    /// Anything the server sends that we don't know is treated as blocked.
    pub fn of(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "ACTIVE" => CardStatus::Active,
            "EXPIRED" => CardStatus::Expired,
            _ => CardStatus::Blocked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Debit,
    Credit,
}

impl CardType {
    pub fn of(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "CREDIT" => CardType::Credit,
            _ => CardType::Debit,
        }
    }
}

#[derive(Getters, Debug, Clone, PartialEq)]
pub struct Card {
    id: String,
    customer_id: String,
    currency: Currency,
    status: CardStatus,
    card_type: CardType,
    balance: f64,
    pan: String,
    created_at: DateTime<Local>,
}

impl Card {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        customer_id: String,
        currency: Currency,
        status: CardStatus,
        card_type: CardType,
        balance: f64,
        pan: String,
        created_at: DateTime<Local>,
    ) -> Self {
        Self { id, customer_id, currency, status, card_type, balance, pan, created_at }
    }

    pub fn balance_text(&self) -> String {
        format!("{} {}", self.balance, self.currency)
    }

    /// Masked PAN showing only its last dash-separated group, e.g. `*5678`.
    pub fn last_pan_digits(&self) -> String {
        format!("*{}", self.pan.rsplit('-').next().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(pan: &str) -> Card {
        Card::new(
            "c1".into(),
            "42".into(),
            Currency::of("azn"),
            CardStatus::of("active"),
            CardType::of("debit"),
            125.5,
            pan.into(),
            Local::now(),
        )
    }

    #[test]
    fn balance_text_joins_amount_and_currency() {
        assert_eq!(card("4169-7388-1234-5678").balance_text(), "125.5 AZN");
    }

    #[test]
    fn last_pan_digits_masks_all_but_last_group() {
        assert_eq!(card("4169-7388-1234-5678").last_pan_digits(), "*5678");
        assert_eq!(card("41697388").last_pan_digits(), "*41697388");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(Currency::of("XYZ"), Currency::Unknown);
        assert_eq!(CardStatus::of("frozen"), CardStatus::Blocked);
        assert_eq!(CardType::of("prepaid"), CardType::Debit);
    }
}
