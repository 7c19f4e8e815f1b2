//! Storecast CLI Library
//!
//! Terminal client for the storecast server: authentication, the store
//! directory, and message listing and composition.

pub mod auth_cmd;
pub mod client;
pub mod config;
pub mod fmt;
pub mod message_cmd;
pub mod store_cmd;
