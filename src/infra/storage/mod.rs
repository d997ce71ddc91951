//! Local persistence on top of an opendal operator: one JSON table per entity
//! plus a small preferences document.

use std::path::Path;

use opendal::{services, Operator};
use tracing::info;

use crate::shared::errors::Fault;

pub mod card;
pub mod customer;
pub mod settings;
pub mod table;
pub mod transaction;

/// Operator rooted at `root` on the local file system.
pub fn fs_operator(root: &Path) -> Result<Operator, Fault> {
    let root_as_str = root.to_str().ok_or_else(|| {
        Fault::Fatal(format!("Can't get valid path object from path {}, invalid path", root.display()))
    })?;
    let builder = services::Fs::default().root(root_as_str);
    let op = Operator::new(builder)?.finish();
    info!(root = root_as_str, "Local storage ready.");
    Ok(op)
}

/// Volatile operator, nothing survives the process.
pub fn memory_operator() -> Result<Operator, Fault> {
    Ok(Operator::new(services::Memory::default())?.finish())
}
