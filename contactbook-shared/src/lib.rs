//! # Contact Book Shared Library
//!
//! This crate contains the domain types and business logic behind the
//! contact book API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their queries
//! - `auth`: Password hashing, JWT tokens, request identity
//! - `db`: Connection pool and migrations
//! - `store`: Persistence ports with PostgreSQL and in-memory adapters
//! - `services`: Registration/login and owner-scoped contact operations

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the contact book shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
