//! Pinlog API service.
//!
//! Devices register once with their own unique ID to obtain an API key, then
//! submit timestamped pin-state readings authenticated by that key.
//!
//! # Configuration
//!
//! See [`config::PinlogApiConfig`] for configuration options.
//!
//! # Authentication
//!
//! Readings are authenticated by the `api-key` header. See [`auth`] for key
//! generation and lookup.

pub mod auth;
pub mod config;
pub mod server;

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handlers;
