use std::ops::ControlFlow;

use tracing::debug;

use super::dto::ServerProblemDescription;
use crate::domain::errors::{DomainError, ServerError};
use crate::domain::ports::error_mapper::ErrorMapper;
use crate::shared::errors::Fault;

/// Classifies failed HTTP exchanges and transport faults.
///
/// This mapper claims every fault it is given; anything it does not recognise
/// becomes [`DomainError::Unknown`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoteErrorMapper;

impl RemoteErrorMapper {
    fn map_http_error(status: u16, body: Option<&str>) -> ServerError {
        let description = body.map(ServerProblemDescription::parse_lenient).unwrap_or_default();
        let ServerProblemDescription { code, message } = description;

        match status {
            401 => ServerError::NotAuthorized { code, message },
            500..=600 => ServerError::ServerIsDown { code, message },
            _ => ServerError::Unexpected { code, message },
        }
    }
}

impl ErrorMapper for RemoteErrorMapper {
    fn map_error(&self, fault: Fault) -> ControlFlow<DomainError, Fault> {
        let mapped = match fault {
            Fault::ClientRequest { status, ref body } => {
                Self::map_http_error(status, Some(body.as_str())).into()
            }
            Fault::Response { status } => Self::map_http_error(status, None).into(),
            Fault::Timeout(_) | Fault::Io(_) => DomainError::network(fault),
            other => DomainError::unknown(other),
        };
        debug!(error = %mapped, "Mapped remote fault.");
        ControlFlow::Break(mapped)
    }
}
