//! Command line surface over the application graph.

use clap::{Parser, Subcommand};

use crate::domain::models::AppLanguage;
use crate::infra::config::AppArgs;

pub mod commands;
pub mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub app_args: AppArgs,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check whether a phone number is registered on this device.
    Splash,
    /// Register the phone number used on this device.
    Login { phone: String },
    /// Fetch fresh data from the bank into the local cache.
    Sync {
        #[command(subcommand)]
        target: SyncTarget,
    },
    /// Print cached data.
    Show {
        #[command(subcommand)]
        target: ShowTarget,
        /// Keep printing every change until interrupted.
        #[arg(short, long, default_value_t = false, global = true)]
        watch: bool,
    },
    /// Read or change the interface language.
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },
    /// Show how a server error with the given status and code is reported.
    Error {
        #[arg(long)]
        code: u16,
        #[arg(long, default_value = "error.unexpected")]
        identifier: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SyncTarget {
    Customers,
    Cards,
    Transactions {
        #[arg(long)]
        card: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShowTarget {
    Customer,
    Cards,
    Transactions {
        #[arg(long)]
        card: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum LanguageAction {
    Get,
    Set {
        #[arg(value_parser = parse_language)]
        language: AppLanguage,
    },
    /// Print the language now and after every change.
    Watch,
}

fn parse_language(value: &str) -> Result<AppLanguage, String> {
    AppLanguage::ALL
        .into_iter()
        .find(|language| language.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("Unsupported language {value}, expected one of: az, en"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_commands() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "teller",
            "--host",
            "api.bank.az",
            "--customer-id",
            "42",
            "show",
            "transactions",
            "--card",
            "c1",
            "--watch",
        ])?;
        assert_eq!(cli.app_args.host.as_str(), "https://api.bank.az/");
        assert_eq!(cli.app_args.customer_id.as_deref(), Some("42"));
        assert!(matches!(
            cli.command,
            Command::Show { target: ShowTarget::Transactions { ref card }, watch: true } if card == "c1"
        ));
        Ok(())
    }

    #[test]
    fn language_names_are_case_insensitive() {
        assert_eq!(parse_language("az"), Ok(AppLanguage::AZ));
        assert_eq!(parse_language("EN"), Ok(AppLanguage::EN));
        assert!(parse_language("ru").is_err());
    }
}
