//! CLI command implementations.
//!
//! - [`serve`] - HTTP server for the country collection
//! - [`locate`] - Resolve a country and print its focus point
//! - [`config`] - Configuration management (path, show, init)

pub mod common;
pub mod config;
pub mod locate;
pub mod serve;
