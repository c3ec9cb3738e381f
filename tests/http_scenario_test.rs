//! End-to-end [`BudgetCache`] scenarios over HTTP (wiremock).
//!
//! Backoff, TTL and timeout are shrunk so the scenarios run in real time.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use litellm_budget::{BudgetCache, CacheConfig, CacheStatus, FetchError, RetryConfig};

fn success() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "info": { "spend": 25.0, "max_budget": 100.0, "budget_reset_at": "2025-01-15T10:00:00Z" }
    }))
}

fn cache_for(server: &MockServer, ttl: Duration) -> BudgetCache {
    BudgetCache::builder()
        .base_url(server.uri())
        .http_timeout(Duration::from_millis(100))
        .retry(RetryConfig::new().initial_backoff(Duration::from_millis(5)))
        .cache(CacheConfig::new().ttl(ttl))
        .build()
        .unwrap()
}

#[tokio::test]
async fn always_ok_hits_the_network_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/key/info"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(success())
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server, Duration::from_secs(30));
    let first = cache.get("tok").await.unwrap();
    let second = cache.get("tok").await.unwrap();

    assert_eq!(first.spend(), Some(25.0));
    assert_eq!(first.max_budget(), Some(100.0));
    assert_eq!(first, second);
}

#[tokio::test]
async fn always_unauthorized_retries_then_cools_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/key/info"))
        .respond_with(ResponseTemplate::new(401))
        .expect(4)
        .mount(&server)
        .await;

    let cache = cache_for(&server, Duration::from_secs(30));
    assert_eq!(cache.get("tok").await, Err(FetchError::Auth { status: 401 }));

    for _ in 0..3 {
        assert!(matches!(
            cache.get("tok").await,
            Err(FetchError::Cooldown { .. })
        ));
    }
    // `expect(4)` is verified when the server drops
}

#[tokio::test]
async fn ok_then_timeouts_serves_cache_then_cools_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/key/info"))
        .respond_with(success())
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/key/info"))
        .respond_with(success().set_delay(Duration::from_secs(2)))
        .with_priority(2)
        .mount(&server)
        .await;

    let cache = cache_for(&server, Duration::from_millis(300));
    let first = cache.get("tok").await.unwrap();
    assert_eq!(cache.get("tok").await.unwrap(), first);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    tokio::time::sleep(Duration::from_millis(350)).await;
    let err = cache.get("tok").await.unwrap_err();
    assert!(
        matches!(err, FetchError::Transport { timed_out: true, .. }),
        "got {err:?}"
    );

    let snapshot = cache.snapshot().await;
    assert_eq!(snapshot.status, CacheStatus::Stale);
    assert_eq!(snapshot.last_record, Some(first));
    assert!(snapshot.cooldown_remaining.is_some());

    assert!(matches!(
        cache.get("tok").await,
        Err(FetchError::Cooldown { .. })
    ));
}
