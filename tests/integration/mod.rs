//! Integration tests for the LightBnB store.
//!
//! Each test opens a single-connection pool and builds the schema as
//! temporary tables, so tests never touch (or see) permanent data.

pub mod property_test;
pub mod user_test;
pub mod reservation_test;
