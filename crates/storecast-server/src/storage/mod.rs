//! SQLite storage for the Storecast server.
//!
//! Provides persistence for users, sessions, the store directory, and
//! messages.

mod db;
mod models;
mod queries;


pub use db::{DatabaseError, StorecastDatabase, unix_timestamp};
pub use models::*;
