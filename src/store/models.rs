//! Input records for the insert operations.

use crate::db::Value;
use serde::{Deserialize, Serialize};

/// A user to be registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Stored as given; hashing is the caller's concern.
    pub password: String,
}

impl NewUser {
    /// Parameters in `(name, email, password)` column order.
    pub(crate) fn params(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.as_str()),
            Value::from(self.email.as_str()),
            Value::from(self.password.as_str()),
        ]
    }
}

/// A property listing to be created.
///
/// `cost_per_night` is already in stored minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

impl NewProperty {
    /// Parameters in the column order of the property insert.
    pub(crate) fn params(&self) -> Vec<Value> {
        vec![
            Value::Int(self.owner_id),
            Value::from(self.title.as_str()),
            Value::from(self.description.as_deref()),
            Value::from(self.thumbnail_photo_url.as_str()),
            Value::from(self.cover_photo_url.as_str()),
            Value::Int(self.cost_per_night),
            Value::from(self.street.as_str()),
            Value::from(self.city.as_str()),
            Value::from(self.province.as_str()),
            Value::from(self.post_code.as_str()),
            Value::from(self.country.as_str()),
            Value::from(self.parking_spaces),
            Value::from(self.number_of_bathrooms),
            Value::from(self.number_of_bedrooms),
        ]
    }
}
