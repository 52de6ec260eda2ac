//! Equipments Kernel Library
//!
//! HTTP server, resource store and equipment services for the equipments
//! plugin. The main entry point for running the server is the `equipments`
//! binary; the library is exposed for integration testing.

pub mod config;
pub mod db;
pub mod equipment;
pub mod error;
pub mod extension;
pub mod menu;
pub mod plugin;
pub mod routes;
pub mod seed;
pub mod state;
pub mod theme;

pub use config::Config;
pub use state::AppState;
