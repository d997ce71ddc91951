use std::sync::Arc;

use async_trait::async_trait;

use super::base::{BaseUseCase, UseCaseRuntime};
use crate::domain::ports::repositories::ErrorConverterRepository;
use crate::shared::errors::Fault;

/// Status code plus problem identifier to simulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCodeParams {
    pub code: u16,
    pub identifier: String,
}

/// Raises a simulated HTTP failure and returns it through the regular error
/// conversion, so callers can preview how each error is presented.
#[derive(Clone)]
pub struct GetErrorFromCodeUseCase {
    runtime: UseCaseRuntime,
    repository: Arc<dyn ErrorConverterRepository>,
}

impl GetErrorFromCodeUseCase {
    pub fn new(runtime: UseCaseRuntime, repository: Arc<dyn ErrorConverterRepository>) -> Self {
        Self { runtime, repository }
    }
}

#[async_trait]
impl BaseUseCase for GetErrorFromCodeUseCase {
    type Params = ErrorCodeParams;
    type Output = ();

    fn runtime(&self) -> &UseCaseRuntime {
        &self.runtime
    }

    async fn execute_on_background(&self, params: ErrorCodeParams) -> Result<(), Fault> {
        self.repository.get_error(params.code, &params.identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{AppError, ServerError};
    use crate::domain::usecases::testing::remote_runtime;
    use crate::infra::repository::error_converter::ErrorConverterRepositoryImpl;

    async fn convert(code: u16, identifier: &str) -> Option<ServerError> {
        let use_case = GetErrorFromCodeUseCase::new(remote_runtime(), Arc::new(ErrorConverterRepositoryImpl));
        let err = use_case.execute(ErrorCodeParams { code, identifier: identifier.into() }).await.err();
        err.as_ref().and_then(AppError::as_server).cloned()
    }

    #[tokio::test]
    async fn statuses_map_to_their_server_error() {
        assert_eq!(
            convert(401, "AUTH001").await,
            Some(ServerError::NotAuthorized { code: Some("AUTH001".into()), message: None })
        );
        assert_eq!(
            convert(503, "MAINT").await,
            Some(ServerError::ServerIsDown { code: Some("MAINT".into()), message: None })
        );
        assert_eq!(
            convert(404, "error.unexpected").await,
            Some(ServerError::Unexpected { code: Some("error.unexpected".into()), message: None })
        );
    }
}
