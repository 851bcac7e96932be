//! Integration Tests for the HTTP data source and caching fetcher
//!
//! Runs an in-process fake PokeAPI on an ephemeral port and points the real
//! client at it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use pokedex::error::ApiError;
use pokedex::{CachingFetcher, DataSource, HttpClient, TtlCache};

// == Fake PokeAPI ==

#[derive(Clone, Default)]
struct FakeApi {
    hits: Arc<AtomicUsize>,
    base: Arc<std::sync::OnceLock<String>>,
}

impl FakeApi {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn location_areas(
    State(api): State<FakeApi>,
    axum::extract::Query(query): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Json<serde_json::Value> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    let base = api.base.get().cloned().unwrap_or_default();
    let offset: u32 = query.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);

    let (next, previous) = if offset == 0 {
        (Some(format!("{}/location-area?offset=20&limit=20", base)), None)
    } else {
        (None, Some(format!("{}/location-area?offset=0&limit=20", base)))
    };
    let names: Vec<_> = (offset..offset + 2)
        .map(|i| json!({ "name": format!("area-{}", i), "url": "" }))
        .collect();

    Json(json!({ "count": 22, "next": next, "previous": previous, "results": names }))
}

async fn location_area(State(api): State<FakeApi>, Path(name): Path<String>) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "id": 1,
        "name": name,
        "pokemon_encounters": [
            { "pokemon": { "name": "tentacool", "url": "" }, "version_details": [] }
        ]
    }))
    .into_response()
}

async fn pokemon(State(api): State<FakeApi>, Path(name): Path<String>) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);
    match name.as_str() {
        "pikachu" => Json(json!({
            "id": 25,
            "name": "pikachu",
            "base_experience": 112,
            "height": 4,
            "weight": 60,
            "stats": [{ "base_stat": 35, "effort": 0, "stat": { "name": "hp", "url": "" } }],
            "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }]
        }))
        .into_response(),
        "glitch" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "flaky" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "slowpoke" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            StatusCode::OK.into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Starts the fake API and returns it with its `/api/v2` base URL.
async fn spawn_fake_api() -> (FakeApi, String) {
    let api = FakeApi::default();
    let app = Router::new()
        .route("/api/v2/location-area", get(location_areas))
        .route("/api/v2/location-area/:name/", get(location_area))
        .route("/api/v2/pokemon/:name/", get(pokemon))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let base = format!("http://{}/api/v2", listener.local_addr().unwrap());
    api.base.set(base.clone()).unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (api, base)
}

fn client(base: &str) -> HttpClient {
    HttpClient::new(base, Duration::from_millis(500)).unwrap()
}

// == HttpClient Tests ==

#[tokio::test]
async fn test_first_page_and_next_link() {
    let (_api, base) = spawn_fake_api().await;
    let client = client(&base);

    let first = assert_ok!(client.location_areas(None).await);
    assert_eq!(first.results[0].name, "area-0");
    assert!(first.previous.is_none());

    let second = assert_ok!(client.location_areas(first.next.as_deref()).await);
    assert_eq!(second.results[0].name, "area-20");
    assert!(second.next.is_none());
    assert!(second.previous.is_some());
}

#[tokio::test]
async fn test_location_area_encounters() {
    let (_api, base) = spawn_fake_api().await;

    let area = assert_ok!(client(&base).location_area("canalave-city-area").await);
    assert_eq!(area.name, "canalave-city-area");
    assert_eq!(area.pokemon_names().collect::<Vec<_>>(), vec!["tentacool"]);
}

#[tokio::test]
async fn test_pokemon_success() {
    let (_api, base) = spawn_fake_api().await;

    let pikachu = assert_ok!(client(&base).pokemon("pikachu").await);
    assert_eq!(pikachu.id, 25);
    assert_eq!(pikachu.base_experience(), 112);
    assert_eq!(pikachu.types[0].kind.name, "electric");
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let (_api, base) = spawn_fake_api().await;

    let err = assert_err!(client(&base).pokemon("missingno").await);
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_bad_body_is_decode_error() {
    let (_api, base) = spawn_fake_api().await;

    let err = assert_err!(client(&base).pokemon("glitch").await);
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_timeout_is_request_error() {
    let (_api, base) = spawn_fake_api().await;

    let err = assert_err!(client(&base).pokemon("slowpoke").await);
    assert!(matches!(err, ApiError::Request { .. }));
}

// == CachingFetcher over HttpClient ==

fn cached_client(base: &str, ttl: Duration) -> CachingFetcher<HttpClient> {
    CachingFetcher::new(client(base), TtlCache::new(Duration::from_millis(20)), ttl)
}

#[tokio::test]
async fn test_repeat_fetch_does_not_reach_server() {
    let (api, base) = spawn_fake_api().await;
    let fetcher = cached_client(&base, Duration::from_secs(60));

    let first = assert_ok!(fetcher.pokemon("pikachu").await);
    let second = assert_ok!(fetcher.pokemon("pikachu").await);

    assert_eq!(first, second);
    assert_eq!(api.hits(), 1);
}

#[tokio::test]
async fn test_server_errors_are_not_cached() {
    let (api, base) = spawn_fake_api().await;
    let fetcher = cached_client(&base, Duration::from_secs(60));

    for _ in 0..3 {
        assert_err!(fetcher.pokemon("flaky").await);
    }

    assert_eq!(api.hits(), 3);
    assert!(fetcher.cache().is_empty().await);
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let (api, base) = spawn_fake_api().await;
    let fetcher = cached_client(&base, Duration::from_millis(30));

    assert_ok!(fetcher.location_areas(None).await);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The sweep (20ms) has already reclaimed the entry
    assert!(fetcher.cache().is_empty().await);

    assert_ok!(fetcher.location_areas(None).await);
    assert_eq!(api.hits(), 2);
}

#[tokio::test]
async fn test_concurrent_misses_each_reach_server() {
    let (api, base) = spawn_fake_api().await;
    let fetcher = Arc::new(cached_client(&base, Duration::from_secs(60)));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let fetcher = fetcher.clone();
            tokio::spawn(async move { fetcher.location_area("eterna-city-area").await })
        })
        .collect();
    for task in tasks {
        assert_ok!(task.await.unwrap());
    }

    // No request coalescing: between 1 and 4 requests, one surviving entry
    assert!((1..=4).contains(&api.hits()));
    assert_eq!(fetcher.cache().len().await, 1);
}
