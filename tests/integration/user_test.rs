//! User lookup and registration against a live database.

use super::common::get_test_client;
use lightbnb_store::db::{DatabaseClient, Value};
use lightbnb_store::store::{NewUser, Store};

#[tokio::test]
async fn test_get_user_with_email() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let user = store
        .get_user_with_email("grace@example.com")
        .await
        .unwrap()
        .expect("seeded user");
    assert_eq!(user.get("id"), Some(&Value::Int(2)));
    assert_eq!(user.get("name"), Some(&Value::from("Grace Hopper")));

    assert!(store
        .get_user_with_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_get_user_with_id() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let user = store.get_user_with_id(3).await.unwrap().expect("seeded user");
    assert_eq!(user.get("email"), Some(&Value::from("linus@example.com")));
    assert!(store.get_user_with_id(404).await.unwrap().is_none());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_add_user_then_lookup_by_email() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let store = Store::new(&client);

    let new_user = NewUser {
        name: "Katherine Johnson".to_string(),
        email: "katherine@example.com".to_string(),
        password: "password".to_string(),
    };
    let inserted = store.add_user(&new_user).await.unwrap();
    assert_eq!(inserted.get("id"), Some(&Value::Int(4)));

    let found = store
        .get_user_with_email("katherine@example.com")
        .await
        .unwrap()
        .expect("inserted user");
    assert_eq!(found.get("email"), Some(&Value::from("katherine@example.com")));
    assert_eq!(found.get("id"), inserted.get("id"));

    client.close().await.unwrap();
}
