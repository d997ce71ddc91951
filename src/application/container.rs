//! Wires every data source, repository and use-case together.

use std::sync::Arc;

use anyhow::{Context, Result};
use opendal::Operator;
use tokio::runtime::Handle;
use tracing::{info, instrument};

use crate::domain::ports::error_mapper::ErrorMapper;
use crate::domain::ports::repositories::{
    AppSettingsDataSource, AuthRepository, CardRepository, CustomerRepository, ErrorConverterRepository,
    TransactionRepository,
};
use crate::domain::services::error_converter::ErrorConverterImpl;
use crate::domain::usecases::auth::{LoginUseCase, SplashUseCase};
use crate::domain::usecases::card::{ObserveCardsUseCase, SyncCardsUseCase};
use crate::domain::usecases::customer::{ObserveCustomerUseCase, SyncCustomersUseCase};
use crate::domain::usecases::error::GetErrorFromCodeUseCase;
use crate::domain::usecases::language::{GetAppLanguageUseCase, ObserveAppLanguageUseCase, SaveLanguageUseCase};
use crate::domain::usecases::transaction::{ObserveTransactionsUseCase, SyncTransactionsUseCase};
use crate::domain::usecases::UseCaseRuntime;
use crate::infra::config::AppArgs;
use crate::infra::network::api::{CardApiService, CustomerApiService, TransactionApiService};
use crate::infra::network::error_mapper::RemoteErrorMapper;
use crate::infra::network::http_adapter::HttpAdapter;
use crate::infra::repository::auth::AuthRepositoryImpl;
use crate::infra::repository::card::CardRepositoryImpl;
use crate::infra::repository::customer::CustomerRepositoryImpl;
use crate::infra::repository::error_converter::ErrorConverterRepositoryImpl;
use crate::infra::repository::transaction::TransactionRepositoryImpl;
use crate::infra::storage::card::FsCardLocalDataSource;
use crate::infra::storage::customer::FsCustomerLocalDataSource;
use crate::infra::storage::fs_operator;
use crate::infra::storage::settings::{AppSettingsDataSourceImpl, PreferenceStore};
use crate::infra::storage::transaction::FsTransactionLocalDataSource;

/// Every use-case of the application, ready to run.
#[derive(Clone)]
pub struct AppGraph {
    pub splash: SplashUseCase,
    pub login: LoginUseCase,
    pub sync_customers: SyncCustomersUseCase,
    pub observe_customer: ObserveCustomerUseCase,
    pub sync_cards: SyncCardsUseCase,
    pub observe_cards: ObserveCardsUseCase,
    pub sync_transactions: SyncTransactionsUseCase,
    pub observe_transactions: ObserveTransactionsUseCase,
    pub get_app_language: GetAppLanguageUseCase,
    pub observe_app_language: ObserveAppLanguageUseCase,
    pub save_language: SaveLanguageUseCase,
    pub get_error_from_code: GetErrorFromCodeUseCase,
}

impl AppGraph {
    /// Builds the graph on top of the data directory from `args`.
    ///
    /// Must be called from within a tokio runtime; its handle becomes the
    /// background context of every use-case.
    pub async fn build(args: &AppArgs) -> Result<Self> {
        let data_dir = args.resolved_data_dir()?;
        let op = fs_operator(&data_dir)?;
        Self::with_operator(args, op).await
    }

    #[instrument(name = "build_graph", skip_all, fields(host = %args.host))]
    pub async fn with_operator(args: &AppArgs, op: Operator) -> Result<Self> {
        let http = HttpAdapter::new(args)?;

        let preferences = Arc::new(PreferenceStore::open(op.clone()).await.context("Can't open preferences.")?);
        let customer_local = Arc::new(
            FsCustomerLocalDataSource::open(op.clone(), args.customer_id.clone())
                .await
                .context("Can't open customer table.")?,
        );
        let card_local = Arc::new(FsCardLocalDataSource::open(op.clone()).await.context("Can't open card table.")?);
        let transaction_local = Arc::new(
            FsTransactionLocalDataSource::open(op)
                .await
                .context("Can't open transaction table.")?,
        );

        let customers: Arc<dyn CustomerRepository> = Arc::new(CustomerRepositoryImpl::new(
            Arc::new(CustomerApiService::new(http.clone())),
            customer_local.clone(),
        ));
        let cards: Arc<dyn CardRepository> = Arc::new(CardRepositoryImpl::new(
            Arc::new(CardApiService::new(http.clone())),
            customer_local.clone(),
            card_local,
        ));
        let transactions: Arc<dyn TransactionRepository> = Arc::new(TransactionRepositoryImpl::new(
            Arc::new(TransactionApiService::new(http)),
            customer_local,
            transaction_local,
        ));
        let auth: Arc<dyn AuthRepository> = Arc::new(AuthRepositoryImpl::new(Arc::clone(&preferences)));
        let settings: Arc<dyn AppSettingsDataSource> = Arc::new(AppSettingsDataSourceImpl::new(preferences));
        let errors: Arc<dyn ErrorConverterRepository> = Arc::new(ErrorConverterRepositoryImpl);

        let converter = ErrorConverterImpl::new([Arc::new(RemoteErrorMapper) as Arc<dyn ErrorMapper>]);
        let runtime = UseCaseRuntime::new(Handle::current(), Arc::new(converter));
        info!("Application graph ready.");

        Ok(Self {
            splash: SplashUseCase::new(runtime.clone(), Arc::clone(&auth), args.splash_delay()),
            login: LoginUseCase::new(runtime.clone(), auth),
            sync_customers: SyncCustomersUseCase::new(runtime.clone(), Arc::clone(&customers)),
            observe_customer: ObserveCustomerUseCase::new(runtime.clone(), customers),
            sync_cards: SyncCardsUseCase::new(runtime.clone(), Arc::clone(&cards)),
            observe_cards: ObserveCardsUseCase::new(runtime.clone(), cards),
            sync_transactions: SyncTransactionsUseCase::new(runtime.clone(), Arc::clone(&transactions)),
            observe_transactions: ObserveTransactionsUseCase::new(runtime.clone(), transactions),
            get_app_language: GetAppLanguageUseCase::new(runtime.clone(), Arc::clone(&settings)),
            observe_app_language: ObserveAppLanguageUseCase::new(runtime.clone(), Arc::clone(&settings)),
            save_language: SaveLanguageUseCase::new(runtime.clone(), settings),
            get_error_from_code: GetErrorFromCodeUseCase::new(runtime, errors),
        })
    }
}
