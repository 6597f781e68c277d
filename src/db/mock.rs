//! Fake database clients for testing.
//!
//! [`MockDatabaseClient`] records every statement it receives and replays
//! queued results; [`FailingDatabaseClient`] rejects every statement.

use super::{DatabaseClient, QueryResult, Row, Value};
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A statement received by [`MockDatabaseClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    /// Statement text as sent.
    pub sql: String,
    /// Bound parameters in placeholder order.
    pub params: Vec<Value>,
}

/// A mock database client that returns predefined results.
///
/// Queued results are handed out in order; once the queue is empty every
/// statement yields an empty result.
#[derive(Default)]
pub struct MockDatabaseClient {
    responses: Mutex<VecDeque<QueryResult>>,
    recorded: Mutex<Vec<RecordedQuery>>,
}

impl MockDatabaseClient {
    /// Creates a new mock client with no queued results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client whose first statement returns `rows`.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        let client = Self::new();
        client.push_rows(rows);
        client
    }

    /// Queues a result for the next unanswered statement.
    pub fn push_rows(&self, rows: Vec<Row>) {
        lock(&self.responses).push_back(QueryResult::from_rows(rows));
    }

    /// Returns every statement received so far.
    pub fn recorded(&self) -> Vec<RecordedQuery> {
        lock(&self.recorded).clone()
    }

    /// Returns the most recent statement, if any.
    pub fn last_query(&self) -> Option<RecordedQuery> {
        lock(&self.recorded).last().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        lock(&self.recorded).push(RecordedQuery {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        let result = lock(&self.responses).pop_front().unwrap_or_default();
        Ok(result.with_execution_time(Duration::from_millis(1)))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A client whose every statement fails with the same query error.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a client that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn query(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult> {
        Err(StoreError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
