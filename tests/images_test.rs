//! Integration tests for the list, fetch, and delete endpoints.

mod common;

use common::{upload, upload_png, TestHarness};

#[tokio::test]
async fn list_is_empty_initially() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/images")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let listed: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn fetch_round_trips_bytes_and_content_type() {
    let (_h, addr) = TestHarness::with_server().await;

    let payload = b"\x89PNG\r\n\x1a\n fake png body".to_vec();
    let resp = upload(addr, payload.clone(), "roundtrip.png", "image/png").await;
    assert_eq!(resp.status(), 201);
    let meta: serde_json::Value = resp.json().await.unwrap();
    let id = meta["id"].as_str().unwrap();

    let resp = reqwest::get(format!("http://{addr}/images/{id}")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/png"
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(&body[..], &payload[..]);
}

#[tokio::test]
async fn fetch_serves_jpeg_content_type() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = upload(addr, b"\xFF\xD8\xFF jpeg".to_vec(), "j.jpg", "image/jpeg").await;
    let meta: serde_json::Value = resp.json().await.unwrap();
    let id = meta["id"].as_str().unwrap();

    let resp = reqwest::get(format!("http://{addr}/images/{id}")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn fetch_unknown_id_is_404() {
    let (_h, addr) = TestHarness::with_server().await;

    let id = uuid::Uuid::new_v4();
    let resp = reqwest::get(format!("http://{addr}/images/{id}")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Not found"}));
}

#[tokio::test]
async fn fetch_malformed_id_is_404() {
    let (_h, addr) = TestHarness::with_server().await;

    // Ids are opaque; an unparseable one is simply absent.
    let resp = reqwest::get(format!("http://{addr}/images/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_returns_confirmation() {
    let (_h, addr) = TestHarness::with_server().await;
    let id = upload_png(addr, "doomed.png").await;

    let resp = reqwest::Client::new()
        .delete(format!("http://{addr}/images/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Deleted");
    assert_eq!(body["id"], id.as_str());
}

#[tokio::test]
async fn delete_is_final() {
    let (_h, addr) = TestHarness::with_server().await;
    let id = upload_png(addr, "gone.png").await;

    let client = reqwest::Client::new();
    let resp = client
        .delete(format!("http://{addr}/images/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Subsequent fetch fails.
    let resp = reqwest::get(format!("http://{addr}/images/{id}")).await.unwrap();
    assert_eq!(resp.status(), 404);

    // Double-delete deterministically fails rather than silently succeeding.
    let resp = client
        .delete(format!("http://{addr}/images/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Not found");

    // The id never reappears in the listing.
    let listed: Vec<serde_json::Value> = reqwest::get(format!("http://{addr}/images"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.iter().all(|m| m["id"] != id.as_str()));
}

#[tokio::test]
async fn delete_of_unknown_id_is_404() {
    let (_h, addr) = TestHarness::with_server().await;

    let id = uuid::Uuid::new_v4();
    let resp = reqwest::Client::new()
        .delete(format!("http://{addr}/images/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn list_tracks_uploads_and_deletes_exactly() {
    let (_h, addr) = TestHarness::with_server().await;

    let a = upload_png(addr, "a.png").await;
    let b = upload_png(addr, "b.png").await;
    let c = upload_png(addr, "c.png").await;

    let resp = reqwest::Client::new()
        .delete(format!("http://{addr}/images/{b}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let listed: Vec<serde_json::Value> = reqwest::get(format!("http://{addr}/images"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Exactly the live records, in insertion order.
    let ids: Vec<&str> = listed.iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![a.as_str(), c.as_str()]);
}

#[tokio::test]
async fn list_returns_metadata_without_bytes() {
    let (_h, addr) = TestHarness::with_server().await;
    upload_png(addr, "meta.png").await;

    let listed: Vec<serde_json::Value> = reqwest::get(format!("http://{addr}/images"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let meta = &listed[0];
    assert_eq!(meta["filename"], "meta.png");
    assert_eq!(meta["mimeType"], "image/png");
    assert!(meta["size"].is_u64());
    assert!(meta["uploadedAt"].is_string());
    assert!(meta.get("data").is_none());
}
