use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::base::{BaseUseCase, UseCaseRuntime};
use crate::domain::models::SplashStatus;
use crate::domain::ports::repositories::AuthRepository;
use crate::shared::errors::Fault;

/// Holds the splash screen for `delay`, then tells whether a phone number is
/// already registered.
#[derive(Clone)]
pub struct SplashUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn AuthRepository>,
    delay: Duration,
}

impl SplashUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn AuthRepository>, delay: Duration) -> Self {
        Self { runtime, repository, delay }
    }
}

#[async_trait]
impl BaseUseCase for SplashUseCase {
    type Params = ();
    type Output = SplashStatus;

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, _: ()) -> Result<SplashStatus, Fault> {
        tokio::time::sleep(self.delay).await;
        let status = match self.repository.registered_phone().await? {
            Some(phone) => SplashStatus::Registered(phone),
            None => SplashStatus::NotRegistered,
        };
        debug!(?status, "Splash finished.");
        Ok(status)
    }
}

/// Registers the phone number. Params: the phone number.
#[derive(Clone)]
pub struct LoginUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn AuthRepository>,
}

impl LoginUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn AuthRepository>) -> Self {
        Self { runtime, repository }
    }
}

#[async_trait]
impl BaseUseCase for LoginUseCase {
    type Params = String;
    type Output = ();

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, phone: String) -> Result<(), Fault> {
        self.repository.login(&phone).await
    }
}
