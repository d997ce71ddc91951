use thiserror::Error;

use crate::shared::errors::Fault;

fn describe(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("[{code}] {message}"),
        (Some(code), None) => format!("[{code}]"),
        (None, Some(message)) => message.clone(),
        (None, None) => "no details".into(),
    }
}

/// Unsuccessful responses, classified by HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("Not authorized: {}", describe(code, message))]
    NotAuthorized { code: Option<String>, message: Option<String> },
    #[error("Server is down: {}", describe(code, message))]
    ServerIsDown { code: Option<String>, message: Option<String> },
    #[error("Unexpected server error: {}", describe(code, message))]
    Unexpected { code: Option<String>, message: Option<String> },
}

impl ServerError {
    pub fn code(&self) -> Option<&str> {
        match self {
            ServerError::NotAuthorized { code, .. }
            | ServerError::ServerIsDown { code, .. }
            | ServerError::Unexpected { code, .. } => code.as_deref(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ServerError::NotAuthorized { message, .. }
            | ServerError::ServerIsDown { message, .. }
            | ServerError::Unexpected { message, .. } => message.as_deref(),
        }
    }
}

/// Classified error understood by the presentation layer.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Transport or timeout failure; worth retrying later.
    #[error("Network error: {0}")]
    Network(#[source] Box<Fault>),
    #[error(transparent)]
    Server(#[from] ServerError),
    /// Nothing recognised it. The original fault is kept for diagnostics.
    #[error("Unknown error: {0}")]
    Unknown(#[source] Box<Fault>),
}

impl DomainError {
    pub fn network(fault: Fault) -> Self {
        DomainError::Network(Box::new(fault))
    }

    pub fn unknown(fault: Fault) -> Self {
        DomainError::Unknown(Box::new(fault))
    }
}

/// What a use-case hands back on failure: a converted error, or the original
/// fault when no mapper claimed it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Unconverted(#[from] Fault),
}

impl AppError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(err) => Some(err),
            AppError::Unconverted(_) => None,
        }
    }

    pub fn as_server(&self) -> Option<&ServerError> {
        match self.as_domain() {
            Some(DomainError::Server(err)) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_uses_problem_description() {
        let err = ServerError::NotAuthorized {
            code: Some("AUTH001".into()),
            message: Some("Session expired".into()),
        };
        assert_eq!(err.to_string(), "Not authorized: [AUTH001] Session expired");
        assert_eq!(err.code(), Some("AUTH001"));
        assert_eq!(err.message(), Some("Session expired"));

        let bare = ServerError::ServerIsDown { code: None, message: None };
        assert_eq!(bare.to_string(), "Server is down: no details");
    }

    #[test]
    fn app_error_exposes_server_error() {
        let err: AppError = DomainError::from(ServerError::Unexpected { code: None, message: None }).into();
        assert!(matches!(err.as_server(), Some(ServerError::Unexpected { .. })));

        let passthrough: AppError = Fault::Cancelled.into();
        assert!(passthrough.as_domain().is_none());
    }
}
