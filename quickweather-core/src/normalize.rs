//! Reconciles the two OpenWeather payload shapes into one canonical
//! `WeatherSnapshot`: the combined endpoint needs little more than field
//! renaming, while the split pair's 3-hour forecast list is reshaped into
//! hourly and per-day sequences.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    Condition, CurrentConditions, DailyForecast, HourlySample, WeatherSnapshot,
};
use crate::provider::openweather::{
    OneCallResponse, OwCurrentResponse, OwForecastEntry, OwForecastResponse, WeatherTag,
};

/// Canonical hourly sequence length.
pub const HOURLY_LEN: usize = 24;

fn tag_condition(tags: &[WeatherTag]) -> Condition {
    tags.first().map(|t| Condition::from_group(&t.main)).unwrap_or_default()
}

fn tag_description(tags: &[WeatherTag]) -> String {
    tags.first().map(|t| t.description.clone()).unwrap_or_default()
}

/// Case A: the combined endpoint already matches the canonical shape;
/// rename fields and cap the hourly sequence.
pub fn snapshot_from_combined(raw: OneCallResponse) -> WeatherSnapshot {
    let current = CurrentConditions {
        timestamp: raw.current.dt.unwrap_or_else(|| Utc::now().timestamp()),
        temp: raw.current.temp,
        feels_like: raw.current.feels_like,
        humidity: raw.current.humidity,
        wind_speed: raw.current.wind_speed,
        condition: tag_condition(&raw.current.weather),
        description: tag_description(&raw.current.weather),
    };

    let hourly = raw
        .hourly
        .into_iter()
        .take(HOURLY_LEN)
        .map(|h| HourlySample {
            timestamp: h.dt,
            temp: h.temp,
            condition: tag_condition(&h.weather),
        })
        .collect();

    let daily = raw
        .daily
        .into_iter()
        .map(|d| DailyForecast {
            timestamp: d.dt,
            temp_min: d.temp.min,
            temp_max: d.temp.max,
            condition: tag_condition(&d.weather),
            description: tag_description(&d.weather),
        })
        .collect();

    WeatherSnapshot { current, hourly, daily, timezone_offset: raw.timezone_offset }
}

/// Case B: build a snapshot from the split pair.
///
/// The first 24 forecast entries stand in for hourly samples even though
/// they are 3 hours apart, padded by repeating the last entry when fewer
/// exist. This misrepresents time resolution on purpose and is kept for
/// output compatibility. The split endpoints expose no timezone offset, so
/// it is always 0 here.
pub fn snapshot_from_split(
    current: OwCurrentResponse,
    forecast: OwForecastResponse,
) -> WeatherSnapshot {
    let current = CurrentConditions {
        timestamp: current.dt.unwrap_or_else(|| Utc::now().timestamp()),
        temp: current.main.temp,
        feels_like: current.main.feels_like,
        humidity: current.main.humidity,
        wind_speed: current.wind.speed,
        condition: tag_condition(&current.weather),
        description: tag_description(&current.weather),
    };

    let mut hourly: Vec<HourlySample> = forecast
        .list
        .iter()
        .take(HOURLY_LEN)
        .map(|entry| HourlySample {
            timestamp: entry.dt,
            temp: entry.main.temp,
            condition: tag_condition(&entry.weather),
        })
        .collect();

    if let Some(last) = hourly.last().cloned() {
        while hourly.len() < HOURLY_LEN {
            hourly.push(last.clone());
        }
    }

    WeatherSnapshot { current, hourly, daily: daily_from_entries(&forecast.list), timezone_offset: 0 }
}

/// Group 3-hour entries by UTC calendar day, ascending. Per day: min/max
/// over the non-null per-entry bounds, and condition, description and
/// timestamp from the middle entry (floor of count / 2).
fn daily_from_entries(entries: &[OwForecastEntry]) -> Vec<DailyForecast> {
    let mut days: BTreeMap<NaiveDate, Vec<&OwForecastEntry>> = BTreeMap::new();
    for entry in entries {
        let Some(day) = DateTime::<Utc>::from_timestamp(entry.dt, 0) else {
            continue;
        };
        days.entry(day.date_naive()).or_default().push(entry);
    }

    days.into_values()
        .map(|group| {
            let temp_min = group.iter().filter_map(|e| e.main.temp_min).reduce(f64::min);
            let temp_max = group.iter().filter_map(|e| e.main.temp_max).reduce(f64::max);

            let mid = group.len() / 2;
            let (condition, description, timestamp) = match group.get(mid) {
                Some(entry) => {
                    (tag_condition(&entry.weather), tag_description(&entry.weather), entry.dt)
                }
                None => (Condition::Unknown, String::new(), Utc::now().timestamp()),
            };

            DailyForecast { timestamp, temp_min, temp_max, condition, description }
        })
        .collect()
}
