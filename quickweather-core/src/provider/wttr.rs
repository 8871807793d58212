//! Keyless wttr.in source. Its `j1` payload has a distinct schema (string
//! temperature fields suffixed per unit system) and is handed to the
//! presentation layer as-is, without normalization.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::WeatherError,
    model::{Place, Units},
    provider::{Payload, Report, WeatherSource},
};

const WTTR_BASE_URL: &str = "https://wttr.in";

const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default)]
pub struct WttrSource {
    http: Client,
}

impl WttrSource {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl WeatherSource for WttrSource {
    async fn fetch(&self, place: &Place, _units: Units) -> Result<Report, WeatherError> {
        let query = match place {
            Place::City(city) => urlencoding::encode(city).into_owned(),
            Place::Coords { lat, lon } => format!("{lat},{lon}"),
        };
        let url = format!("{WTTR_BASE_URL}/{query}");

        let res = self
            .http
            .get(&url)
            .query(&[("format", "j1")])
            .timeout(TIMEOUT)
            .send()
            .await
            .map_err(|e| WeatherError::transport("wttr.in", e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::transport("wttr.in", e))?;

        if !status.is_success() {
            return Err(WeatherError::status("wttr.in", status, &body));
        }

        let report: KeylessReport =
            serde_json::from_str(&body).map_err(|e| WeatherError::decode("wttr.in", e))?;

        Ok(Report { label: place.label(), payload: Payload::Keyless(report) })
    }
}

/// Top-level `j1` payload: one current-condition object (in a single-element
/// array) plus per-day entries.
#[derive(Debug, Default, Deserialize)]
pub struct KeylessReport {
    #[serde(default)]
    pub current_condition: Vec<KeylessCurrent>,
    #[serde(default)]
    pub weather: Vec<KeylessDay>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeylessCurrent {
    #[serde(default, rename = "temp_C")]
    pub temp_c: Option<String>,
    #[serde(default, rename = "temp_F")]
    pub temp_f: Option<String>,
    #[serde(default, rename = "FeelsLikeC")]
    pub feels_like_c: Option<String>,
    #[serde(default, rename = "FeelsLikeF")]
    pub feels_like_f: Option<String>,
    #[serde(default)]
    pub humidity: Option<String>,
    #[serde(default, rename = "weatherDesc")]
    pub weather_desc: Vec<KeylessText>,
}

impl KeylessCurrent {
    pub fn temp(&self, units: Units) -> Option<&str> {
        match units {
            Units::Metric => self.temp_c.as_deref(),
            Units::Imperial => self.temp_f.as_deref(),
        }
    }

    pub fn feels_like(&self, units: Units) -> Option<&str> {
        match units {
            Units::Metric => self.feels_like_c.as_deref(),
            Units::Imperial => self.feels_like_f.as_deref(),
        }
    }

    pub fn description(&self) -> &str {
        self.weather_desc.first().map(|d| d.value.as_str()).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KeylessText {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeylessDay {
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "maxtempC")]
    pub max_temp_c: Option<String>,
    #[serde(default, rename = "maxtempF")]
    pub max_temp_f: Option<String>,
    #[serde(default, rename = "mintempC")]
    pub min_temp_c: Option<String>,
    #[serde(default, rename = "mintempF")]
    pub min_temp_f: Option<String>,
}

impl KeylessDay {
    pub fn max_temp(&self, units: Units) -> Option<&str> {
        match units {
            Units::Metric => self.max_temp_c.as_deref(),
            Units::Imperial => self.max_temp_f.as_deref(),
        }
    }

    pub fn min_temp(&self, units: Units) -> Option<&str> {
        match units {
            Units::Metric => self.min_temp_c.as_deref(),
            Units::Imperial => self.min_temp_f.as_deref(),
        }
    }
}
