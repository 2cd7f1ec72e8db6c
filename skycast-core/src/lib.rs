//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration handling and the injected client configuration
//! - The OpenWeather fetch client and its fetcher abstraction
//! - Day-bucketing aggregation of the 3-hourly forecast feed
//! - The cache-aware repository and its key-value store abstraction
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod repo;

pub use aggregate::aggregate_daily;
pub use cache::{CacheStore, FileStore, MemoryStore};
pub use client::{WeatherClient, WeatherFetcher};
pub use config::{ClientConfig, Config};
pub use error::WeatherError;
pub use location::{FixedLocation, LocationProvider};
pub use model::{Condition, Coordinates, CurrentWeather, ForecastDay, ForecastEntry, Main};
pub use repo::WeatherRepository;
