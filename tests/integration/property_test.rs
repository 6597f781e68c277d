//! Property search and insert against a live database.

use super::common::get_test_client;
use lightbnb_store::db::{DatabaseClient, Row, Value};
use lightbnb_store::store::{NewProperty, SearchCriteria, Store};

fn cost(row: &Row) -> i64 {
    row.get("cost_per_night").and_then(Value::as_i64).unwrap()
}

fn city(row: &Row) -> String {
    row.get("city")
        .and_then(Value::as_str)
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_search_without_criteria_is_limited_and_ordered() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let rows = store
        .get_all_properties(&SearchCriteria::new(), Some(5))
        .await
        .unwrap();

    assert_eq!(rows.len(), 5);
    let costs: Vec<i64> = rows.iter().map(cost).collect();
    let mut sorted = costs.clone();
    sorted.sort();
    assert_eq!(costs, sorted);
    assert_eq!(costs[0], 3000);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_search_city_is_case_insensitive_substring() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let rows = store
        .get_all_properties(&SearchCriteria::new().with_city("par"), None)
        .await
        .unwrap();

    let cities: Vec<String> = rows.iter().map(city).collect();
    assert!(cities.contains(&"Paris".to_string()));
    assert!(cities.contains(&"PARIS".to_string()));
    assert!(cities.iter().all(|c| c.to_lowercase().contains("par")));
    assert!(!cities.contains(&"Toronto".to_string()));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_search_price_bounds_are_exclusive() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let criteria = SearchCriteria::new()
        .with_minimum_price(50.0)
        .with_maximum_price(150.0);
    let rows = store.get_all_properties(&criteria, None).await.unwrap();

    let costs: Vec<i64> = rows.iter().map(cost).collect();
    assert_eq!(costs, vec![9000, 12000]);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_search_minimum_rating_alone() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let rows = store
        .get_all_properties(&SearchCriteria::new().with_minimum_rating(4.0), None)
        .await
        .unwrap();

    let titles: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("title").and_then(Value::as_str))
        .collect();
    assert_eq!(titles, vec!["Left Bank flat", "Harbour view", "Penthouse"]);
    for row in &rows {
        let rating = row.get("average_rating").and_then(Value::as_f64).unwrap();
        assert!(rating >= 4.0, "rating {rating} below threshold");
    }

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_search_combined_filters() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let criteria = SearchCriteria::new()
        .with_owner_id(3)
        .with_city("toronto")
        .with_minimum_rating(4.5);
    let rows = store.get_all_properties(&criteria, None).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(cost(&rows[0]), 40000);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_search_without_matches_is_empty() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let rows = store
        .get_all_properties(&SearchCriteria::new().with_city("Atlantis"), None)
        .await
        .unwrap();
    assert!(rows.is_empty());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_add_property_returns_inserted_row() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let property = NewProperty {
        owner_id: 2,
        title: "Lakeside cabin".to_string(),
        description: None,
        thumbnail_photo_url: "https://example.com/thumb.jpg".to_string(),
        cover_photo_url: "https://example.com/cover.jpg".to_string(),
        cost_per_night: 8800,
        street: "7 Shore Rd".to_string(),
        city: "Kelowna".to_string(),
        province: "BC".to_string(),
        post_code: "V1Y".to_string(),
        country: "Canada".to_string(),
        parking_spaces: 2,
        number_of_bathrooms: 1,
        number_of_bedrooms: 3,
    };

    let rows = store.add_property(&property).await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("id"), Some(&Value::Int(7)));
    assert_eq!(row.get("description"), Some(&Value::Null));
    assert_eq!(row.get("number_of_bathrooms"), Some(&Value::Int(1)));
    assert_eq!(row.get("number_of_bedrooms"), Some(&Value::Int(3)));

    let found = store
        .get_all_properties(&SearchCriteria::new().with_city("kelowna"), None)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("average_rating"), Some(&Value::Null));

    client.close().await.unwrap();
}
