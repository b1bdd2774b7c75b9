//! Storage Layer
//!
//! Handles all data persistence: the SQLite session store and JSON config.

pub mod config;
pub mod database;

pub use config::*;
pub use database::*;
