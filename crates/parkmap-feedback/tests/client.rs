//! Integration tests for `FeedbackClient` and `FeedbackCache` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use parkmap_core::FeedSchema;
use parkmap_feedback::{FeedbackCache, FeedbackClient, FeedbackError, FeedbackIndex};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> FeedbackClient {
    FeedbackClient::new(&format!("{}/exec", server.uri()), 5)
        .expect("client construction should not fail")
}

fn localized_record(timestamp: &str, facility_id: &str, image: serde_json::Value) -> serde_json::Value {
    json!({
        "タイムスタンプ": timestamp,
        "【自動で入力されます。変更しないでください】施設タイプ": "公園",
        "どのような情報ですか？": "遊具の破損",
        "詳細について教えてください": "ブランコの鎖が外れています",
        "画像があればアプロードしてください": image,
        "【自動で入力されます。変更しないでください】施設ID": facility_id,
    })
}

#[tokio::test]
async fn fetch_feedback_normalizes_localized_records() {
    let server = MockServer::start().await;
    let body = json!({
        "status": "success",
        "records": [
            localized_record("2024/01/02 10:00:00", "P-001", json!("https://drive.example/1")),
            localized_record("", "P-001", json!("")),
            localized_record("2024/01/05 08:30:00", "P-002", json!("")),
        ]
    });
    Mock::given(method("GET"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let feedback = test_client(&server)
        .fetch_feedback(FeedSchema::Auto)
        .await
        .expect("feed should parse");

    assert_eq!(feedback.len(), 2);
    assert_eq!(feedback[0].facility_id, "P-001");
    assert_eq!(feedback[0].image_urls, vec!["https://drive.example/1"]);
    assert_eq!(feedback[0].facility_type, "公園");
    assert!(feedback[1].image_urls.is_empty());
}

#[tokio::test]
async fn server_error_degrades_to_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.try_fetch_envelope().await.unwrap_err();
    assert!(matches!(err, FeedbackError::Http(_)), "got {err:?}");

    let envelope = client.fetch_envelope().await;
    assert!(envelope.is_error());
    assert!(envelope.records.is_empty());
}

#[tokio::test]
async fn non_json_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).try_fetch_envelope().await.unwrap_err();
    assert!(matches!(err, FeedbackError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "records": [{"timestamp": "2024-01-02", "facilityId": "1", "imageUrls": []}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server).with_retries(1, 1);
    let envelope = client.try_fetch_envelope().await.expect("second attempt succeeds");
    assert_eq!(envelope.records.len(), 1);
}

#[tokio::test]
async fn unreachable_feed_is_an_error_envelope() {
    let client = FeedbackClient::new("http://127.0.0.1:1/exec", 2).expect("client");
    let envelope = client.fetch_envelope().await;
    assert!(envelope.is_error());
}

#[tokio::test]
async fn cache_serves_snapshot_within_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "records": [{"timestamp": "2024-01-02", "facilityId": "1", "imageUrls": []}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache = FeedbackCache::new(
        test_client(&server),
        FeedSchema::Auto,
        Duration::from_secs(60),
    );
    assert!(cache.peek().await.is_none());
    assert_eq!(cache.get().await.len(), 1);
    assert_eq!(cache.get().await.len(), 1);
    // `expect(1)` is verified when the server drops.
}

#[tokio::test]
async fn cache_keeps_previous_snapshot_when_refresh_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "records": [
                {"timestamp": "2024-01-02", "facilityId": "1", "imageUrls": []},
                {"timestamp": "2024-01-05", "facilityId": "1", "imageUrls": []}
            ]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cache = FeedbackCache::new(test_client(&server), FeedSchema::Auto, Duration::ZERO);
    let first = cache.get().await;
    assert_eq!(first.len(), 2);

    let second = cache.get().await;
    assert_eq!(second.len(), 2, "stale data beats no data");
    assert_eq!(second.feedback_for("1")[0].timestamp, "2024-01-05");
}

#[tokio::test]
async fn cache_starts_empty_when_first_fetch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache = FeedbackCache::new(test_client(&server), FeedSchema::Auto, Duration::from_secs(60));
    let index = cache.get().await;
    assert!(index.is_empty());
    assert!(index.feedback_for("1").is_empty());
}

#[tokio::test]
async fn invalidate_forces_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success", "records": []})))
        .expect(2)
        .mount(&server)
        .await;

    let cache = FeedbackCache::new(
        test_client(&server),
        FeedSchema::Auto,
        Duration::from_secs(60),
    );
    cache.get().await;
    cache.invalidate().await;
    cache.get().await;
}

fn one_record_feed() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "success",
        "records": [{"timestamp": "2024-01-02", "facilityId": "1", "imageUrls": []}]
    }))
}

/// Polls until a snapshot exists; panics after `limit`.
async fn wait_for_snapshot(cache: &FeedbackCache, limit: Duration) -> Arc<FeedbackIndex> {
    tokio::time::timeout(limit, async {
        loop {
            if let Some(index) = cache.peek().await {
                return index;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("background refresh should land")
}

#[tokio::test]
async fn peek_does_not_wait_for_a_slow_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(one_record_feed().set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    let cache = Arc::new(FeedbackCache::new(
        test_client(&server),
        FeedSchema::Auto,
        Duration::from_secs(60),
    ));

    let refreshing = Arc::clone(&cache);
    tokio::spawn(async move { refreshing.get().await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let peeked = tokio::time::timeout(Duration::from_millis(500), cache.peek())
        .await
        .expect("peek must not block on the in-flight fetch");
    assert!(peeked.is_none());
}

#[tokio::test]
async fn current_answers_immediately_and_refreshes_in_background() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(one_record_feed())
        .expect(1)
        .mount(&server)
        .await;
    let cache = Arc::new(FeedbackCache::new(
        test_client(&server),
        FeedSchema::Auto,
        Duration::from_secs(60),
    ));

    assert!(cache.current().await.is_empty());
    assert_eq!(wait_for_snapshot(&cache, Duration::from_secs(2)).await.len(), 1);
    // Fresh now, so no second fetch.
    assert_eq!(cache.current().await.len(), 1);
}

#[tokio::test]
async fn stale_readers_share_one_background_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(one_record_feed().set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&server)
        .await;
    let cache = Arc::new(FeedbackCache::new(
        test_client(&server),
        FeedSchema::Auto,
        Duration::from_secs(60),
    ));

    for _ in 0..5 {
        let index = tokio::time::timeout(Duration::from_millis(200), cache.current())
            .await
            .expect("current must not wait for the feed");
        assert!(index.is_empty());
    }
    assert_eq!(wait_for_snapshot(&cache, Duration::from_secs(3)).await.len(), 1);
}
