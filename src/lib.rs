//! End-to-end driver for the storage GraphQL API.
//!
//! [`storage::StorageApi`] issues the individual operations,
//! [`suite::SuiteRunner`] chains them into the bucket/file scenario and
//! reports what passed.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod graphql;
pub mod models;
pub mod storage;
pub mod suite;
pub mod utils;
