use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::repositories::ErrorConverterRepository;
use crate::infra::network::dto::ServerProblemDescription;
use crate::shared::errors::Fault;

/// Produces the same fault a failed API call with the given status and
/// problem code would.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorConverterRepositoryImpl;

#[async_trait]
impl ErrorConverterRepository for ErrorConverterRepositoryImpl {
    async fn get_error(&self, code: u16, identifier: &str) -> Result<(), Fault> {
        let body = serde_json::to_string(&ServerProblemDescription::with_code(identifier))?;
        debug!(status = code, body, "Raising simulated client fault.");
        Err(Fault::ClientRequest { status: code, body })
    }
}

#[tokio::test]
async fn test_simulated_fault_carries_problem_body() {
    let fault = ErrorConverterRepositoryImpl.get_error(401, "AUTH001").await.err();
    assert!(matches!(
        fault,
        Some(Fault::ClientRequest { status: 401, ref body }) if body == r#"{"code":"AUTH001"}"#
    ));
}
