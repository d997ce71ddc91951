//! Repository implementations: remote API in, local storage out.

pub mod auth;
pub mod card;
pub mod customer;
pub mod error_converter;
pub mod transaction;
