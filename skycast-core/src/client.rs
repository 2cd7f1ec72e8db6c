use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};

use crate::aggregate::aggregate_daily;
use crate::cache::{
    CACHE_KEY_CURRENT_WEATHER, CACHE_KEY_FORECAST, CACHE_KEY_FORECAST_WRITTEN, CacheStore,
};
use crate::config::ClientConfig;
use crate::error::{WeatherError, truncate_body};
use crate::model::{Coordinates, CurrentWeather, ForecastDay, ForecastResponse};

/// Network-facing weather operations, kept behind a trait so the repository
/// can be exercised against a fake in tests.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_current(&self, coords: Coordinates) -> Result<CurrentWeather, WeatherError>;

    async fn fetch_forecast(&self, coords: Coordinates) -> Result<Vec<ForecastDay>, WeatherError>;
}

/// OpenWeather fetch client.
///
/// Performs the HTTP call, validates the status, decodes the body, persists
/// the raw bytes to the cache store, and (for forecasts) collapses the raw
/// feed to one entry per day. Raw bytes are cached only after a successful
/// decode, so a malformed 200 response cannot poison later cache reads.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    config: ClientConfig,
    store: Arc<dyn CacheStore>,
}

impl WeatherClient {
    /// Build with an injected HTTP client (tests pass one pointed at a stub
    /// server).
    pub fn new(http: Client, config: ClientConfig, store: Arc<dyn CacheStore>) -> Self {
        Self {
            http,
            config,
            store,
        }
    }

    /// Build with a default HTTP client.
    pub fn from_config(config: ClientConfig, store: Arc<dyn CacheStore>) -> Self {
        Self::new(Client::new(), config, store)
    }

    fn endpoint(&self, path: &str) -> Result<Url, WeatherError> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| WeatherError::Request(e.to_string()))?;
        base.join(path)
            .map_err(|e| WeatherError::Request(e.to_string()))
    }

    async fn get_validated(&self, path: &str, coords: Coordinates) -> Result<Vec<u8>, WeatherError> {
        let url = self.endpoint(path)?;

        let res = self
            .http
            .get(url)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            return Err(WeatherError::Http {
                status,
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl WeatherFetcher for WeatherClient {
    async fn fetch_current(&self, coords: Coordinates) -> Result<CurrentWeather, WeatherError> {
        tracing::debug!(lat = coords.lat, lon = coords.lon, "fetching current weather");

        let body = self.get_validated("weather", coords).await?;
        let reading: CurrentWeather = serde_json::from_slice(&body)?;

        self.store.set(CACHE_KEY_CURRENT_WEATHER, &body);

        Ok(reading)
    }

    async fn fetch_forecast(&self, coords: Coordinates) -> Result<Vec<ForecastDay>, WeatherError> {
        tracing::debug!(lat = coords.lat, lon = coords.lon, "fetching 5-day forecast");

        let body = self.get_validated("forecast", coords).await?;
        let parsed: ForecastResponse = serde_json::from_slice(&body)?;

        self.store.set(CACHE_KEY_FORECAST, &body);
        self.store
            .set_number(CACHE_KEY_FORECAST_WRITTEN, Utc::now().timestamp() as f64);

        Ok(aggregate_daily(&parsed.list))
    }
}
