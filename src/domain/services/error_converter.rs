use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::AppError;
use crate::domain::ports::error_mapper::{ErrorConverter, ErrorMapper};
use crate::shared::errors::Fault;

/// Tries each mapper in registration order. The first one that claims a fault
/// wins; an unclaimed fault is handed back as is.
pub struct ErrorConverterImpl {
    mappers: Vec<Arc<dyn ErrorMapper>>,
}

impl ErrorConverterImpl {
    pub fn new(mappers: impl IntoIterator<Item = Arc<dyn ErrorMapper>>) -> Self {
        let mut unique: Vec<Arc<dyn ErrorMapper>> = Vec::new();
        for mapper in mappers {
            if !unique.iter().any(|known| Arc::ptr_eq(known, &mapper)) {
                unique.push(mapper);
            }
        }
        Self { mappers: unique }
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

impl ErrorConverter for ErrorConverterImpl {
    fn convert(&self, fault: Fault) -> AppError {
        let mut fault = fault;
        for mapper in &self.mappers {
            match mapper.map_error(fault) {
                ControlFlow::Break(mapped) => return mapped.into(),
                ControlFlow::Continue(unclaimed) => fault = unclaimed,
            }
        }
        debug!(error = %fault, "No mapper claimed fault, passing it through.");
        AppError::Unconverted(fault)
    }
}
