use colored::Colorize;

use crate::domain::errors::{AppError, DomainError, ServerError};
use crate::domain::models::{AppLanguage, Card, CardStatus, Customer, SplashStatus, Transaction};

/// Text shown to the user for a failed use-case, in their language.
pub fn error_message(err: &AppError, language: AppLanguage) -> String {
    let headline = match (err.as_domain(), language) {
        (Some(DomainError::Server(ServerError::NotAuthorized { .. })), AppLanguage::AZ) => {
            "Sessiyanın vaxtı bitib, yenidən daxil olun."
        }
        (Some(DomainError::Server(ServerError::NotAuthorized { .. })), AppLanguage::EN) => {
            "Your session has expired, please log in again."
        }
        (Some(DomainError::Server(ServerError::ServerIsDown { .. })), AppLanguage::AZ) => {
            "Server hazırda əlçatan deyil."
        }
        (Some(DomainError::Server(ServerError::ServerIsDown { .. })), AppLanguage::EN) => {
            "The bank is unavailable at the moment."
        }
        (Some(DomainError::Server(ServerError::Unexpected { .. })), AppLanguage::AZ) => {
            "Gözlənilməz xəta baş verdi."
        }
        (Some(DomainError::Server(ServerError::Unexpected { .. })), AppLanguage::EN) => {
            "Something unexpected went wrong."
        }
        (Some(DomainError::Network(_)), AppLanguage::AZ) => "Şəbəkə xətası, bir az sonra yenidən cəhd edin.",
        (Some(DomainError::Network(_)), AppLanguage::EN) => "Network problem, try again later.",
        (Some(DomainError::Unknown(_)) | None, AppLanguage::AZ) => "Naməlum xəta.",
        (Some(DomainError::Unknown(_)) | None, AppLanguage::EN) => "Unknown error.",
    };

    // Server supplied text is more specific than ours when present.
    match err.as_server().and_then(ServerError::message) {
        Some(detail) => format!("{headline} ({detail})"),
        None => headline.to_owned(),
    }
}

pub fn print_error(err: &AppError, language: AppLanguage) {
    eprintln!("{} {}", "error:".red().bold(), error_message(err, language));
    if let Some(code) = err.as_server().and_then(ServerError::code) {
        eprintln!("  {} {}", "code:".dimmed(), code.dimmed());
    }
}

pub fn splash(status: &SplashStatus) -> String {
    match status {
        SplashStatus::Registered(phone) => format!("{} {}", "Registered as".green(), phone.bold()),
        SplashStatus::NotRegistered => "Not registered, run `teller login <phone>`.".yellow().to_string(),
    }
}

pub fn customer(customer: &Customer) -> String {
    format!(
        "{} {}\n  phone: {}\n  since: {}",
        customer.name().bold(),
        format!("#{}", customer.id()).dimmed(),
        customer.phone(),
        customer.created_at().format("%Y-%m-%d"),
    )
}

pub fn card(card: &Card) -> String {
    let status = match card.status() {
        CardStatus::Active => "active".green(),
        CardStatus::Blocked => "blocked".red(),
        CardStatus::Expired => "expired".yellow(),
    };
    format!(
        "{:<8} {:<10} {:>16}  {:?} {}",
        card.last_pan_digits().bold(),
        card.id().dimmed(),
        card.balance_text(),
        card.card_type(),
        status,
    )
}

pub fn transaction(transaction: &Transaction) -> String {
    format!(
        "{}  {:<24} {:>14}  {:?}",
        transaction.created_at().format("%Y-%m-%d %H:%M"),
        transaction.title(),
        transaction.formatted_amount().red(),
        transaction.category(),
    )
}
