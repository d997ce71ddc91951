use std::fmt::Display;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use futures::StreamExt;
use tracing::{debug, info};

use super::render;
use super::{Command, LanguageAction, ShowTarget, SyncTarget};
use crate::application::container::AppGraph;
use crate::domain::errors::AppError;
use crate::domain::models::AppLanguage;
use crate::domain::usecases::error::ErrorCodeParams;
use crate::domain::usecases::{AppStream, BaseFlowUseCase, BaseUseCase};

/// How long a one-off `show` waits for cached data before giving up.
const SHOW_GRACE: Duration = Duration::from_millis(500);

/// Runs one command. Returns whether it succeeded; failures have already been
/// reported to the user.
pub async fn run(graph: &AppGraph, command: Command) -> Result<bool> {
    debug!(?command, "Running command.");
    let outcome = match command {
        Command::Splash => graph.splash.execute(()).await.map(|status| println!("{}", render::splash(&status))),
        Command::Login { phone } => graph
            .login
            .execute(phone)
            .await
            .map(|()| println!("{}", "Phone number registered.".green())),
        Command::Sync { target } => sync(graph, target).await,
        Command::Show { target, watch } => show(graph, target, watch).await,
        Command::Language { action } => language(graph, action).await,
        Command::Error { code, identifier } => graph
            .get_error_from_code
            .execute(ErrorCodeParams { code, identifier })
            .await,
    };

    match outcome {
        Ok(()) => Ok(true),
        Err(err) => {
            let language = graph.get_app_language.execute(()).await.unwrap_or(AppLanguage::AZ);
            render::print_error(&err, language);
            Ok(false)
        }
    }
}

async fn sync(graph: &AppGraph, target: SyncTarget) -> Result<(), AppError> {
    match target {
        SyncTarget::Customers => graph.sync_customers.execute(()).await?,
        SyncTarget::Cards => graph.sync_cards.execute(()).await?,
        SyncTarget::Transactions { card } => graph.sync_transactions.execute(card).await?,
    }
    info!("Sync finished.");
    println!("{}", "Up to date.".green());
    Ok(())
}

async fn show(graph: &AppGraph, target: ShowTarget, watch: bool) -> Result<(), AppError> {
    match target {
        ShowTarget::Customer => {
            let printed = print_flow(graph.observe_customer.observe(()), watch, |customer| render::customer(&customer))
                .await?;
            if !printed {
                println!("{}", "No customer cached yet, run `teller sync customers`.".yellow());
            }
        }
        ShowTarget::Cards => {
            print_flow(graph.observe_cards.observe(()), watch, |cards| {
                cards.iter().map(render::card).collect::<Vec<_>>().join("\n")
            })
            .await?;
        }
        ShowTarget::Transactions { card } => {
            print_flow(graph.observe_transactions.observe(card), watch, |transactions| {
                transactions.iter().map(render::transaction).collect::<Vec<_>>().join("\n")
            })
            .await?;
        }
    }
    Ok(())
}

async fn language(graph: &AppGraph, action: LanguageAction) -> Result<(), AppError> {
    match action {
        LanguageAction::Get => println!("{}", graph.get_app_language.execute(()).await?),
        LanguageAction::Set { language } => {
            graph.save_language.execute(language).await?;
            println!("{} {}", "Language set to".green(), language);
        }
        LanguageAction::Watch => {
            print_flow(graph.observe_app_language.observe(()), true, |language| language.to_string()).await?;
        }
    }
    Ok(())
}

/// Prints the first item of `flow`, or every item when `watch` is set.
/// Returns whether anything was printed.
async fn print_flow<T, S, F>(mut flow: AppStream<T>, watch: bool, format: F) -> Result<bool, AppError>
where
    T: Send + 'static,
    S: Display,
    F: Fn(T) -> S,
{
    if !watch {
        return match tokio::time::timeout(SHOW_GRACE, flow.next()).await {
            Ok(Some(item)) => {
                println!("{}", format(item?));
                Ok(true)
            }
            Ok(None) | Err(_) => Ok(false),
        };
    }

    let mut printed = false;
    while let Some(item) = flow.next().await {
        println!("{}", format(item?));
        printed = true;
    }
    Ok(printed)
}
