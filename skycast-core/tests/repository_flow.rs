//! End-to-end flows: a real `WeatherClient` behind the repository, with the
//! network stubbed by wiremock.

use std::sync::Arc;

use chrono::Utc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::cache::{
    CACHE_KEY_CURRENT_WEATHER, CACHE_KEY_FORECAST, CACHE_KEY_FORECAST_WRITTEN,
};
use skycast_core::{
    CacheStore, ClientConfig, Coordinates, MemoryStore, WeatherClient, WeatherRepository,
};

const CURRENT_BODY: &str = r#"{"name":"Test City","main":{"temp":25.0,"temp_min":20.0,"temp_max":30.0},"weather":[{"description":"Sunny","icon":"sun"}]}"#;

const FORECAST_BODY: &str = r#"{"list":[
    {"dt":1699833600,"main":{"temp":10.0,"temp_min":8.0,"temp_max":11.0},"weather":[{"description":"night","icon":"01n"}]},
    {"dt":1699876800,"main":{"temp":15.0,"temp_min":13.0,"temp_max":17.0},"weather":[{"description":"midday","icon":"01d"}]},
    {"dt":1699898400,"main":{"temp":20.0,"temp_min":14.0,"temp_max":22.0},"weather":[{"description":"evening","icon":"02d"}]}
]}"#;

fn repository(server: &MockServer, store: Arc<MemoryStore>) -> WeatherRepository {
    let config = ClientConfig::new(format!("{}/", server.uri()), "TESTKEY").expect("valid config");
    let client = WeatherClient::new(reqwest::Client::new(), config, store.clone());
    WeatherRepository::new(Box::new(client), store)
}

fn coords() -> Coordinates {
    Coordinates::new(51.5, -0.1)
}

#[tokio::test]
async fn cached_current_is_served_while_forecast_goes_to_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FORECAST_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    // No /weather stub mounted: a current-weather network call would 404.

    let store = Arc::new(MemoryStore::new());
    store.set(CACHE_KEY_CURRENT_WEATHER, CURRENT_BODY.as_bytes());
    let repo = repository(&server, store);

    let reading = repo.get_current_weather(coords()).await.expect("cache hit");
    assert_eq!(reading.name, "Test City");

    let days = repo.get_forecast(coords()).await.expect("network fetch");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].temp(), 15.0);
}

#[tokio::test]
async fn stale_forecast_is_refetched_and_restamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FORECAST_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store.set(CACHE_KEY_FORECAST, b"{\"list\":[]}");
    let stale_stamp = Utc::now().timestamp() as f64 - 3601.0;
    store.set_number(CACHE_KEY_FORECAST_WRITTEN, stale_stamp);
    let repo = repository(&server, store.clone());

    let days = repo.get_forecast(coords()).await.expect("network fetch");

    assert_eq!(days.len(), 1);
    assert_eq!(
        store.get(CACHE_KEY_FORECAST),
        Some(FORECAST_BODY.as_bytes().to_vec())
    );
    let stamp = store
        .get_number(CACHE_KEY_FORECAST_WRITTEN)
        .expect("stamp rewritten");
    assert!(stamp > stale_stamp + 3000.0);
}

#[tokio::test]
async fn fresh_forecast_cache_avoids_the_network_entirely() {
    let server = MockServer::start().await;
    // expect(0): any forecast request would fail the mock's verification.
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store.set(CACHE_KEY_FORECAST, FORECAST_BODY.as_bytes());
    store.set_number(CACHE_KEY_FORECAST_WRITTEN, Utc::now().timestamp() as f64);
    let repo = repository(&server, store);

    let days = repo.get_forecast(coords()).await.expect("cache hit");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].main.temp_min, 8.0);
    assert_eq!(days[0].main.temp_max, 22.0);
}

#[tokio::test]
async fn network_fetch_populates_current_cache_for_the_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let repo = repository(&server, store.clone());

    let first = repo.get_current_weather(coords()).await.expect("network");
    assert_eq!(first.name, "Test City");
    assert_eq!(
        store.get(CACHE_KEY_CURRENT_WEATHER),
        Some(CURRENT_BODY.as_bytes().to_vec())
    );

    // Second call is served from cache; expect(1) above verifies no second
    // request reached the server.
    let second = repo.get_current_weather(coords()).await.expect("cache hit");
    assert_eq!(second.condition(), "Sunny");
}
