//! Database abstraction layer.
//!
//! Provides a trait-based interface for executing parameterized statements,
//! so the store can run against PostgreSQL or an in-memory fake.

mod mock;
mod postgres;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient, RecordedQuery};
pub use postgres::PostgresClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Creates a PostgreSQL client for the given configuration.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = PostgresClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the query-execution primitive the store is built on.
///
/// Implementations bind `params` positionally to `$1..$n` placeholders in
/// `sql`; values are never spliced into the statement text.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a parameterized statement and returns the resulting rows.
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
