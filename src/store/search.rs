//! Filtered property search.
//!
//! Builds the listing query from optional criteria. Each criterion maps to at
//! most one predicate; absent or falsy criteria (empty text, zero) emit
//! nothing. Every literal is bound as a parameter and placeholders are
//! numbered in the order values are bound.

use crate::db::Value;
use crate::error::{Result, StoreError};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional filters for the property listing.
///
/// Prices are in major currency units and are compared against the stored
/// minor-unit `cost_per_night`. Numeric fields also accept numeric strings
/// (`"50"`), as submitted by HTML forms and query strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the property's city.
    pub city: Option<String>,
    /// Exact owner id.
    #[serde(deserialize_with = "lenient_number")]
    pub owner_id: Option<i64>,
    /// Exclusive lower bound on the nightly price.
    #[serde(deserialize_with = "lenient_number")]
    pub minimum_price_per_night: Option<f64>,
    /// Exclusive upper bound on the nightly price.
    #[serde(deserialize_with = "lenient_number")]
    pub maximum_price_per_night: Option<f64>,
    /// Inclusive lower bound on the average review rating.
    #[serde(deserialize_with = "lenient_number")]
    pub minimum_rating: Option<f64>,
}

impl SearchCriteria {
    /// Creates criteria with no filters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_owner_id(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_minimum_price(mut self, price: f64) -> Self {
        self.minimum_price_per_night = Some(price);
        self
    }

    pub fn with_maximum_price(mut self, price: f64) -> Self {
        self.maximum_price_per_night = Some(price);
        self
    }

    pub fn with_minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// Returns true if no criterion would emit a predicate.
    pub fn is_empty(&self) -> bool {
        self.city_filter().is_none()
            && self.owner_filter().is_none()
            && nonzero(self.minimum_price_per_night).is_none()
            && nonzero(self.maximum_price_per_night).is_none()
            && nonzero(self.minimum_rating).is_none()
    }

    fn city_filter(&self) -> Option<&str> {
        self.city.as_deref().filter(|city| !city.is_empty())
    }

    fn owner_filter(&self) -> Option<i64> {
        self.owner_id.filter(|id| *id != 0)
    }

    /// Rejects numeric criteria that cannot be compared meaningfully.
    fn validate(&self) -> Result<()> {
        let numeric = [
            ("minimum_price_per_night", self.minimum_price_per_night),
            ("maximum_price_per_night", self.maximum_price_per_night),
            ("minimum_rating", self.minimum_rating),
        ];
        for (name, value) in numeric {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(StoreError::invalid_input(format!(
                        "{name} must be a finite number, got {value}"
                    )));
                }
            }
        }

        let prices = [
            ("minimum_price_per_night", self.minimum_price_per_night),
            ("maximum_price_per_night", self.maximum_price_per_night),
        ];
        for (name, price) in prices {
            if let Some(price) = price {
                if (price * 100.0).abs() >= MAX_MINOR_UNITS {
                    return Err(StoreError::invalid_input(format!(
                        "{name} is out of range, got {price}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Deserializes an optional number given either as a number or as a numeric
/// string. A blank string counts as absent.
fn lenient_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        String(String),
    }

    match Option::<NumberOrString<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(number)) => Ok(Some(number)),
        Some(NumberOrString::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid number '{text}': {e}")))
        }
    }
}

/// A statement and its positional parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltQuery {
    /// Statement text with `$1..$n` placeholders.
    pub sql: String,
    /// Values for the placeholders, in order.
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// Binds a value and returns its placeholder.
    fn bind(&mut self, value: impl Into<Value>) -> String {
        self.params.push(value.into());
        format!("${}", self.params.len())
    }
}

/// Exclusive bound on `price × 100`; larger products do not fit in `i64`.
const MAX_MINOR_UNITS: f64 = 9_223_372_036_854_775_808.0;

/// Converts a major-unit price to the stored minor-unit integer.
///
/// Out-of-range inputs saturate at the `i64` bounds; the search builder
/// rejects them before converting.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

const SEARCH_SELECT: &str = "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating
FROM properties
LEFT OUTER JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Builds the property listing query for `criteria`, returning at most
/// `limit` rows ordered by ascending nightly price.
pub fn build_property_search(criteria: &SearchCriteria, limit: u32) -> Result<BuiltQuery> {
    if limit == 0 {
        return Err(StoreError::invalid_input("limit must be at least 1"));
    }
    criteria.validate()?;

    // Enumeration order fixes predicate and placeholder order.
    let predicates: Vec<(&str, Value)> = [
        criteria
            .city_filter()
            .map(|city| ("city ILIKE", Value::from(format!("%{city}%")))),
        criteria
            .owner_filter()
            .map(|id| ("owner_id =", Value::Int(id))),
        nonzero(criteria.minimum_price_per_night)
            .map(|price| ("cost_per_night >", Value::Int(to_minor_units(price)))),
        nonzero(criteria.maximum_price_per_night)
            .map(|price| ("cost_per_night <", Value::Int(to_minor_units(price)))),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut query = BuiltQuery {
        sql: String::from(SEARCH_SELECT),
        params: Vec::with_capacity(predicates.len() + 2),
    };

    if !predicates.is_empty() {
        let clauses: Vec<String> = predicates
            .into_iter()
            .map(|(condition, value)| format!("{condition} {}", query.bind(value)))
            .collect();
        query.sql.push_str("\nWHERE ");
        query.sql.push_str(&clauses.join(" AND "));
    }

    query.sql.push_str("\nGROUP BY properties.id");

    if let Some(rating) = nonzero(criteria.minimum_rating) {
        let placeholder = query.bind(rating);
        query
            .sql
            .push_str(&format!("\nHAVING avg(property_reviews.rating) >= {placeholder}"));
    }

    let placeholder = query.bind(i64::from(limit));
    query
        .sql
        .push_str(&format!("\nORDER BY cost_per_night\nLIMIT {placeholder};"));

    Ok(query)
}
