//! # Teller
//!
//! Core of a banking client: customers, cards and transactions are pulled from
//! a remote API into a local cache, and every operation is exposed as a
//! use-case that runs in the background and reports typed errors.

pub mod application;
pub mod domain;
pub mod infra;
pub mod interfaces;
pub mod shared;
pub mod utils;
