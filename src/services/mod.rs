// src/services/mod.rs
pub mod aggregate;
pub mod calculations;
pub mod dashboard;
pub mod demo;
pub mod feeds;
pub mod parse;
pub mod records;
pub mod schema;
pub mod store_config;
pub mod trend;
