//! Day-bucketing of the raw 3-hourly forecast feed.
//!
//! The API delivers up to 8 samples per calendar day; the app shows one row
//! per day. Each UTC date collapses to a single [`ForecastDay`] carrying the
//! mean temperature, the group-wide min/max, and the condition of a
//! representative sample (the midday one when present).

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use crate::model::{ForecastDay, ForecastEntry, Main};

/// Hour (UTC) whose sample best represents a day's conditions.
const REPRESENTATIVE_HOUR: u32 = 12;

/// Collapse raw forecast entries into one entry per UTC calendar day,
/// sorted ascending by timestamp.
///
/// Representative selection prefers the day's 12:00 UTC sample and falls
/// back to the earliest sample of the day, so the result does not depend on
/// the feed's delivery order.
pub fn aggregate_daily(entries: &[ForecastEntry]) -> Vec<ForecastDay> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ForecastEntry>> = BTreeMap::new();
    for entry in entries {
        by_date
            .entry(entry.datetime().date_naive())
            .or_default()
            .push(entry);
    }

    let mut days: Vec<ForecastDay> = by_date
        .into_values()
        .map(|mut group| {
            group.sort_by_key(|e| e.dt);
            aggregate_group(&group)
        })
        .collect();

    days.sort_by_key(|d| d.dt);
    days
}

fn aggregate_group(group: &[&ForecastEntry]) -> ForecastDay {
    let representative = group
        .iter()
        .find(|e| e.datetime().hour() == REPRESENTATIVE_HOUR)
        .unwrap_or(&group[0]);

    let count = group.len() as f64;
    let temp = group.iter().map(|e| e.main.temp).sum::<f64>() / count;
    let temp_min = group
        .iter()
        .map(|e| e.main.temp_min)
        .fold(f64::INFINITY, f64::min);
    let temp_max = group
        .iter()
        .map(|e| e.main.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    ForecastDay {
        dt: representative.dt,
        main: Main {
            temp,
            temp_min,
            temp_max,
        },
        weather: representative.weather.clone(),
    }
}
