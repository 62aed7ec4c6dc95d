//! # Contact Book API Server Library
//!
//! HTTP surface for the contact book: routing, auth middleware, and the
//! mapping from service errors to JSON envelopes.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Extractors that reject with `ApiError`
//! - `response`: Success and error envelope
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
