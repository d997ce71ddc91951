use std::sync::Arc;

use async_trait::async_trait;

use super::base::{BaseFlowUseCase, BaseUseCase, UseCaseRuntime};
use crate::domain::models::AppLanguage;
use crate::domain::ports::repositories::{AppSettingsDataSource, FaultStream};
use crate::shared::errors::Fault;

#[derive(Clone)]
pub struct GetAppLanguageUseCase {
    runtime: UseCaseRuntime,
    settings: Arc<dyn AppSettingsDataSource>,
}

impl GetAppLanguageUseCase {
    pub fn new(runtime: UseCaseRuntime, settings: Arc<dyn AppSettingsDataSource>) -> Self {
        Self { runtime, settings }
    }
}

#[async_trait]
impl BaseUseCase for GetAppLanguageUseCase {
    type Params = ();
    type Output = AppLanguage;

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, _: ()) -> Result<AppLanguage, Fault> {
        self.settings.get_app_language().await
    }
}

#[derive(Clone)]
pub struct ObserveAppLanguageUseCase {
    runtime: UseCaseRuntime,
    settings: Arc<dyn AppSettingsDataSource>,
}

impl ObserveAppLanguageUseCase {
    pub fn new(runtime: UseCaseRuntime, settings: Arc<dyn AppSettingsDataSource>) -> Self {
        Self { runtime, settings }
    }
}

impl BaseFlowUseCase for ObserveAppLanguageUseCase {
    type Params = ();
    type Output = AppLanguage;

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    fn create_flow(&self, _: ()) -> FaultStream<AppLanguage> {
        self.settings.observe_language()
    }
}

#[derive(Clone)]
pub struct SaveLanguageUseCase {
    runtime: UseCaseRuntime,
    settings: Arc<dyn AppSettingsDataSource>,
}

impl SaveLanguageUseCase {
    pub fn new(runtime: UseCaseRuntime, settings: Arc<dyn AppSettingsDataSource>) -> Self {
        Self { runtime, settings }
    }
}

#[async_trait]
impl BaseUseCase for SaveLanguageUseCase {
    type Params = AppLanguage;
    type Output = ();

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, language: AppLanguage) -> Result<(), Fault> {
        self.settings.set_app_language(language).await
    }
}
