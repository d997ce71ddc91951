pub mod error_converter;
