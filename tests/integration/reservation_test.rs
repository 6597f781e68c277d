//! Past-reservation listing against a live database.

use super::common::get_test_client;
use lightbnb_store::db::{DatabaseClient, Value};
use lightbnb_store::store::Store;

#[tokio::test]
async fn test_reservations_exclude_current_and_future_stays() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let rows = store.get_all_reservations(1, None).await.unwrap();

    let titles: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("title").and_then(Value::as_str))
        .collect();
    assert_eq!(titles, vec!["Left Bank flat", "Harbour view"]);

    let today = client
        .query("SELECT current_date AS today", &[])
        .await
        .unwrap()
        .into_first()
        .and_then(|row| row.get("today").and_then(Value::as_date))
        .unwrap();
    for row in &rows {
        let end = row.get("end_date").and_then(Value::as_date).unwrap();
        assert!(end < today, "reservation ending {end} is not in the past");
    }

    let ratings: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get("average_rating").and_then(Value::as_f64))
        .collect();
    assert_eq!(ratings, vec![4.5, 4.0]);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_reservations_respect_limit() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let rows = store.get_all_reservations(1, Some(1)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("title"), Some(&Value::from("Left Bank flat")));

    let other_guest = store.get_all_reservations(3, None).await.unwrap();
    assert!(other_guest.is_empty());

    client.close().await.unwrap();
}
