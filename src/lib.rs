//! LightBnB store - parameterized queries over the LightBnB PostgreSQL schema.
//!
//! This library exposes the store and its database client for the `lightbnb`
//! binary and for integration tests.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod store;
