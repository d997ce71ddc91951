use std::ops::ControlFlow;

use crate::domain::errors::{AppError, DomainError};
use crate::shared::errors::Fault;

/// Maps faults from one source into the domain taxonomy.
///
/// `Break` means the fault was claimed. `Continue` hands the fault back so the
/// next mapper can look at it. Implementations must not fail themselves.
pub trait ErrorMapper: Send + Sync {
    fn map_error(&self, fault: Fault) -> ControlFlow<DomainError, Fault>;
}

/// Turns any fault into something a use-case can return.
pub trait ErrorConverter: Send + Sync {
    fn convert(&self, fault: Fault) -> AppError;
}
