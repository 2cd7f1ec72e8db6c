use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use skycast_core::{
    Config, Coordinates, FileStore, FixedLocation, LocationProvider, WeatherClient,
    WeatherRepository, config::DEFAULT_BASE_URL,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Cached weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and base URL interactively.
    Configure,

    /// Show current weather for a coordinate pair.
    Current {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Show the 5-day forecast for a coordinate pair.
    Forecast {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { lat, lon } => show_current(lat, lon).await,
            Command::Forecast { lat, lon } => show_forecast(lat, lon).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let base_url = inquire::Text::new("API base URL:")
        .with_default(cfg.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .prompt()
        .context("Configuration aborted")?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("Configuration aborted")?;

    cfg.base_url = Some(base_url);
    cfg.api_key = Some(api_key);
    cfg.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn repository() -> anyhow::Result<WeatherRepository> {
    let cfg = Config::load()?;
    let client_cfg = cfg.client_config()?;

    let store = Arc::new(FileStore::open_default()?);
    let client = WeatherClient::from_config(client_cfg, store.clone());

    Ok(WeatherRepository::new(Box::new(client), store))
}

async fn resolve(lat: f64, lon: f64) -> anyhow::Result<Coordinates> {
    FixedLocation(Coordinates::new(lat, lon))
        .current_location()
        .await
}

async fn show_current(lat: f64, lon: f64) -> anyhow::Result<()> {
    let repo = repository()?;
    let coords = resolve(lat, lon).await?;

    let reading = repo.get_current_weather(coords).await?;

    println!("{}: {}", reading.name, reading.condition());
    println!(
        "  {:.1} C (min {:.1} C, max {:.1} C)",
        reading.current_temp(),
        reading.min_temp(),
        reading.max_temp()
    );
    if let Some(icon) = reading.icon_url() {
        println!("  icon: {icon}");
    }

    Ok(())
}

async fn show_forecast(lat: f64, lon: f64) -> anyhow::Result<()> {
    let repo = repository()?;
    let coords = resolve(lat, lon).await?;

    let days = repo.get_forecast(coords).await?;
    if days.is_empty() {
        println!("No forecast data available.");
        return Ok(());
    }

    for day in days {
        println!(
            "{:<9}  {:>5.1} C  (min {:.1} C, max {:.1} C)  {}",
            day.weekday(),
            day.temp(),
            day.main.temp_min,
            day.main.temp_max,
            day.condition()
        );
    }

    Ok(())
}
