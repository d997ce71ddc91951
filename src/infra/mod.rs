pub mod config;
pub mod network;
pub mod repository;
pub mod storage;
