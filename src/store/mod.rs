//! LightBnB data access.
//!
//! [`Store`] exposes the user, reservation, and property queries the web app
//! needs. It owns no connection: every statement goes through the borrowed
//! [`DatabaseClient`], and driver failures are returned unchanged.

mod models;
mod search;

pub use crate::config::DEFAULT_LIMIT;
pub use models::{NewProperty, NewUser};
pub use search::{build_property_search, to_minor_units, BuiltQuery, SearchCriteria};

use crate::db::{DatabaseClient, QueryResult, Row, Value};
use crate::error::{Result, StoreError};
use tracing::debug;
const USER_BY_EMAIL: &str = "SELECT * FROM users WHERE email = $1;";

const USER_BY_ID: &str = "SELECT * FROM users WHERE id = $1;";

const INSERT_USER: &str = "INSERT INTO users (name, email, password)
VALUES ($1, $2, $3)
RETURNING *;";

const PAST_RESERVATIONS: &str = "SELECT properties.*, reservations.*,
  ROUND(AVG(property_reviews.rating), 2)::float8 AS average_rating
FROM properties
JOIN reservations ON reservations.property_id = properties.id
JOIN users ON reservations.guest_id = users.id
JOIN property_reviews ON property_reviews.property_id = properties.id
WHERE users.id = $1
AND reservations.end_date < now()::date
GROUP BY properties.id, reservations.id
ORDER BY reservations.start_date
LIMIT $2;";

const INSERT_PROPERTY: &str = "INSERT INTO properties
  (owner_id, title, description, thumbnail_photo_url, cover_photo_url,
   cost_per_night, street, city, province, post_code, country,
   parking_spaces, number_of_bathrooms, number_of_bedrooms)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
RETURNING *;";

/// Query facade over an injected database client.
#[derive(Clone, Copy)]
pub struct Store<'a> {
    db: &'a dyn DatabaseClient,
}

impl<'a> Store<'a> {
    /// Creates a store that executes through `db`.
    pub fn new(db: &'a dyn DatabaseClient) -> Self {
        Self { db }
    }

    /// Looks up a single user by email.
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<Row>> {
        let result = self.execute(USER_BY_EMAIL, &[Value::from(email)]).await?;
        Ok(result.into_first())
    }

    /// Looks up a single user by id.
    pub async fn get_user_with_id(&self, id: i64) -> Result<Option<Row>> {
        let result = self.execute(USER_BY_ID, &[Value::Int(id)]).await?;
        Ok(result.into_first())
    }

    /// Inserts a user and returns the stored row.
    pub async fn add_user(&self, user: &NewUser) -> Result<Row> {
        let result = self.execute(INSERT_USER, &user.params()).await?;
        result
            .into_first()
            .ok_or_else(|| StoreError::internal("user insert returned no row"))
    }

    /// Lists a guest's completed reservations (ending before today), oldest
    /// stay first, with each property's average rating.
    ///
    /// `None` returns at most [`DEFAULT_LIMIT`] rows.
    pub async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Row>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(StoreError::invalid_input("limit must be at least 1"));
        }

        let params = [Value::Int(guest_id), Value::from(limit)];
        let result = self.execute(PAST_RESERVATIONS, &params).await?;
        Ok(result.into_rows())
    }

    /// Lists properties matching `criteria`, cheapest first.
    ///
    /// `None` returns at most [`DEFAULT_LIMIT`] rows.
    pub async fn get_all_properties(
        &self,
        criteria: &SearchCriteria,
        limit: Option<u32>,
    ) -> Result<Vec<Row>> {
        let query = build_property_search(criteria, limit.unwrap_or(DEFAULT_LIMIT))?;
        debug!(sql = %query.sql, params = query.params.len(), "Property search");

        let result = self.execute(&query.sql, &query.params).await?;
        Ok(result.into_rows())
    }

    /// Inserts a property and returns the stored rows.
    pub async fn add_property(&self, property: &NewProperty) -> Result<Vec<Row>> {
        let result = self.execute(INSERT_PROPERTY, &property.params()).await?;
        Ok(result.into_rows())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let result = self.db.query(sql, params).await?;
        debug!(
            rows = result.row_count,
            columns = result.columns.len(),
            elapsed_ms = result.execution_time.as_millis() as u64,
            "Statement executed"
        );
        Ok(result)
    }
}
