pub mod error_mapper;
pub mod repositories;
