//! Storecast Server Library
//!
//! HTTP backend for the Storecast internal messaging tool:
//! - SQLite storage for users, sessions, the store directory, and messages
//! - Session auth with argon2id credentials and hashed bearer tokens
//! - axum routes implementing the Storecast HTTP API
//! - Seed-file provisioning for users and stores

pub mod auth;
pub mod error;
pub mod extract;
pub mod routes;
pub mod seed;
pub mod storage;
