use std::sync::Arc;

use chrono::Utc;

use crate::aggregate::aggregate_daily;
use crate::cache::{
    CACHE_KEY_CURRENT_WEATHER, CACHE_KEY_FORECAST, CACHE_KEY_FORECAST_WRITTEN, CacheStore,
    FORECAST_MAX_AGE_SECS,
};
use crate::client::WeatherFetcher;
use crate::error::WeatherError;
use crate::model::{Coordinates, CurrentWeather, ForecastDay, ForecastResponse};

/// Cache-aware front of the fetch client.
///
/// Current weather is served from cache whenever a decodable record exists,
/// regardless of age. Forecasts are served from cache only within the
/// freshness window, and aggregation is re-run on the cached raw feed rather
/// than cached itself. Any cache problem is a silent miss; only network-path
/// errors reach the caller.
#[derive(Debug)]
pub struct WeatherRepository {
    fetcher: Box<dyn WeatherFetcher>,
    store: Arc<dyn CacheStore>,
}

impl WeatherRepository {
    pub fn new(fetcher: Box<dyn WeatherFetcher>, store: Arc<dyn CacheStore>) -> Self {
        Self { fetcher, store }
    }

    pub async fn get_current_weather(
        &self,
        coords: Coordinates,
    ) -> Result<CurrentWeather, WeatherError> {
        if let Some(cached) = self.cached_current() {
            tracing::debug!("serving current weather from cache");
            return Ok(cached);
        }
        self.fetcher.fetch_current(coords).await
    }

    pub async fn get_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        if let Some(cached) = self.cached_forecast() {
            tracing::debug!("serving forecast from cache");
            return Ok(cached);
        }
        self.fetcher.fetch_forecast(coords).await
    }

    fn cached_current(&self) -> Option<CurrentWeather> {
        let bytes = self.store.get(CACHE_KEY_CURRENT_WEATHER)?;
        serde_json::from_slice(&bytes).ok()
    }

    fn cached_forecast(&self) -> Option<Vec<ForecastDay>> {
        let bytes = self.store.get(CACHE_KEY_FORECAST)?;
        let written = self.store.get_number(CACHE_KEY_FORECAST_WRITTEN)?;

        let age = Utc::now().timestamp() as f64 - written;
        if age > FORECAST_MAX_AGE_SECS {
            tracing::debug!(age, "cached forecast is stale");
            return None;
        }

        let raw: ForecastResponse = serde_json::from_slice(&bytes).ok()?;
        Some(aggregate_daily(&raw.list))
    }
}
