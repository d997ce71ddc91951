pub mod api;
pub mod dto;
pub mod error_mapper;
pub mod http_adapter;
