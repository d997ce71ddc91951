use std::io::{Error as IoError, ErrorKind};

use thiserror::Error; // A popular crate for defining errors

/// Raw failure raised by a data source before any classification.
///
/// Repositories hand these back untouched; only the use-case layer turns them
/// into [`crate::domain::errors::DomainError`] through an error converter.
#[derive(Error, Debug)]
pub enum Fault {
    /// A 4xx response. The body is kept so a problem description can be read from it.
    #[error("Client request failed with status {status}: {body}")]
    ClientRequest { status: u16, body: String },

    /// Any other unsuccessful response (redirects, 5xx).
    #[error("Server responded with status {status}")]
    Response { status: u16 },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Network connection error: {0}")]
    ReqwestMiddleware(reqwest_middleware::Error),

    #[error("Malformed JSON document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Local storage error: {0}")]
    Storage(#[from] opendal::Error),

    #[error("Background task was cancelled")]
    Cancelled,

    #[error("Critical system failure: {0}")]
    Fatal(String),
}

impl From<reqwest::Error> for Fault {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Fault::Timeout(err.to_string())
        } else if err.is_connect() {
            Fault::Io(IoError::new(ErrorKind::ConnectionRefused, err))
        } else if err.is_body() {
            Fault::Io(IoError::new(ErrorKind::UnexpectedEof, err))
        } else {
            Fault::ReqwestMiddleware(reqwest_middleware::Error::Reqwest(err))
        }
    }
}

/// Timeout and connect flags of the first transport error found in `err`'s
/// source chain. Retry middleware keeps the last attempt's error as a source,
/// itself wrapped in a transparent `reqwest_middleware::Error`.
fn transport_cause(err: &anyhow::Error) -> Option<(bool, bool)> {
    err.chain().find_map(|cause| {
        if let Some(cause) = cause.downcast_ref::<reqwest::Error>() {
            return Some((cause.is_timeout(), cause.is_connect()));
        }
        match cause.downcast_ref::<reqwest_middleware::Error>()? {
            reqwest_middleware::Error::Reqwest(cause) => Some((cause.is_timeout(), cause.is_connect())),
            reqwest_middleware::Error::Middleware(inner) => transport_cause(inner),
        }
    })
}

impl From<reqwest_middleware::Error> for Fault {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            reqwest_middleware::Error::Middleware(err) => {
                let (timeout, connect) = transport_cause(&err).unwrap_or_default();
                if timeout {
                    Fault::Timeout(err.to_string())
                } else if connect {
                    Fault::Io(IoError::new(ErrorKind::ConnectionRefused, err))
                } else {
                    Fault::ReqwestMiddleware(reqwest_middleware::Error::Middleware(err))
                }
            }
        }
    }
}
