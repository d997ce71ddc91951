//! One use-case per application operation.

pub mod auth;
pub mod base;
pub mod card;
pub mod customer;
pub mod error;
pub mod language;
pub mod transaction;

pub use base::{AppStream, BaseFlowUseCase, BaseUseCase, UseCaseRuntime};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::domain::ports::error_mapper::ErrorMapper;
    use crate::domain::services::error_converter::ErrorConverterImpl;
    use crate::infra::network::error_mapper::RemoteErrorMapper;

    use super::UseCaseRuntime;

    /// Runtime converting faults the way the application does.
    pub fn remote_runtime() -> UseCaseRuntime {
        UseCaseRuntime::current(Arc::new(ErrorConverterImpl::new([
            Arc::new(RemoteErrorMapper) as Arc<dyn ErrorMapper>
        ])))
    }
}
