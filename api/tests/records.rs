use std::sync::Arc;

use api::RecordClient;
use serde_json::json;
use tester::StubState;
use tokio::net::TcpListener;

async fn spawn_stub() -> (Arc<StubState>, String) {
    let state = StubState::new();
    let app = tester::router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (state, format!("http://{addr}"))
}

#[tokio::test]
async fn created_records_round_trip_unchanged() {
    let (_state, base_url) = spawn_stub().await;
    let client = RecordClient::new(base_url);

    let created = client
        .create_record("product", &json!({"name": "Cola", "price": 2.5}))
        .await
        .unwrap();

    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Cola");

    let fetched = client.get_record_by_id("product", id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_records_read_as_none() {
    let (_state, base_url) = spawn_stub().await;
    let client = RecordClient::new(base_url);

    assert!(client.get_record_by_id("product", 999).await.is_none());
}

#[tokio::test]
async fn updates_merge_and_return_the_record() {
    let (_state, base_url) = spawn_stub().await;
    let client = RecordClient::new(base_url);

    let created = client
        .create_record("product", &json!({"name": "Cola", "price": 2.5}))
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let updated = client
        .update_record_by_id("product", id, &json!({"price": 3.0}))
        .await
        .unwrap();

    assert_eq!(updated["name"], "Cola");
    assert_eq!(updated["price"], 3.0);

    assert!(client
        .update_record_by_id("product", 999, &json!({"price": 3.0}))
        .await
        .is_none());
}

#[tokio::test]
async fn delete_reports_success_then_failure() {
    let (_state, base_url) = spawn_stub().await;
    let client = RecordClient::new(base_url);

    let created = client
        .create_record("product", &json!({"name": "Chips"}))
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    assert!(client.delete_record_by_id("product", id).await);
    assert!(client.get_record_by_id("product", id).await.is_none());
    assert!(!client.delete_record_by_id("product", id).await);
}

#[tokio::test]
async fn unreachable_backend_reads_as_failure() {
    let client = RecordClient::new("http://127.0.0.1:1");

    assert!(client.get_record_by_id("product", 1).await.is_none());
    assert!(client
        .create_record("product", &json!({"name": "Cola"}))
        .await
        .is_none());
    assert!(!client.delete_record_by_id("product", 1).await);
}
