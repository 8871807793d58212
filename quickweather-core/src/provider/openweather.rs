//! Credentialed OpenWeather source: geocoding, the combined forecast
//! endpoint, and the current+forecast split pair used as its fallback.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::WeatherError,
    model::{Place, Units, WeatherSnapshot},
    normalize,
    provider::{Payload, Report, WeatherSource},
};

const GEOCODE_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const COMBINED_URL: &str = "https://api.openweathermap.org/data/2.5/onecall";
const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

const SHORT_TIMEOUT: Duration = Duration::from_secs(8);
const LONG_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }

    /// GET `url`, returning the body on a success status.
    async fn get_body(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<String, WeatherError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| WeatherError::transport(endpoint, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::transport(endpoint, e))?;

        if !status.is_success() {
            return Err(WeatherError::status(endpoint, status, &body));
        }

        Ok(body)
    }

    async fn geocode(&self, city: &str) -> Result<GeoMatch, WeatherError> {
        let body = self
            .get_body(
                "geocoding",
                GEOCODE_URL,
                &[("q", city), ("limit", "1"), ("appid", &self.api_key)],
                SHORT_TIMEOUT,
            )
            .await?;

        let candidates: Vec<GeoMatch> =
            serde_json::from_str(&body).map_err(|e| WeatherError::decode("geocoding", e))?;

        best_match(city, candidates)
    }

    async fn fetch_combined(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<OneCallResponse, WeatherError> {
        let body = self
            .get_body(
                "combined forecast",
                COMBINED_URL,
                &[
                    ("lat", &lat.to_string()),
                    ("lon", &lon.to_string()),
                    ("units", units.api_value()),
                    ("exclude", "minutely,alerts"),
                    ("appid", &self.api_key),
                ],
                LONG_TIMEOUT,
            )
            .await?;

        serde_json::from_str(&body).map_err(|e| WeatherError::decode("combined forecast", e))
    }

    async fn fetch_split(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<(OwCurrentResponse, OwForecastResponse), WeatherError> {
        let lat = lat.to_string();
        let lon = lon.to_string();
        let query: [(&str, &str); 4] = [
            ("lat", &lat),
            ("lon", &lon),
            ("units", units.api_value()),
            ("appid", &self.api_key),
        ];

        let body = self.get_body("current weather", CURRENT_URL, &query, SHORT_TIMEOUT).await?;
        let current: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::decode("current weather", e))?;

        let body = self.get_body("forecast", FORECAST_URL, &query, LONG_TIMEOUT).await?;
        let forecast: OwForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::decode("forecast", e))?;

        Ok((current, forecast))
    }

    /// Combined endpoint first; any non-success status or transport failure
    /// falls through to the split pair unconditionally, without retrying the
    /// combined endpoint. Split failures surface to the caller.
    async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<WeatherSnapshot, WeatherError> {
        match self.fetch_combined(lat, lon, units).await {
            Ok(raw) => Ok(normalize::snapshot_from_combined(raw)),
            Err(err @ WeatherError::Decode { .. }) => Err(err),
            Err(_) => {
                let (current, forecast) = self.fetch_split(lat, lon, units).await?;
                Ok(normalize::snapshot_from_split(current, forecast))
            }
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn fetch(&self, place: &Place, units: Units) -> Result<Report, WeatherError> {
        let (lat, lon, label) = match place {
            Place::City(city) => {
                let found = self.geocode(city).await?;
                let label = place_label(city, &found);
                (found.lat, found.lon, label)
            }
            Place::Coords { lat, lon } => (*lat, *lon, place.label()),
        };

        let snapshot = self.fetch_forecast(lat, lon, units).await?;

        Ok(Report { label, payload: Payload::Forecast(snapshot) })
    }
}

/// First (best) geocoding candidate wins; an empty candidate list is a
/// NotFound for the requested city, reported before any forecast fetch.
fn best_match(city: &str, candidates: Vec<GeoMatch>) -> Result<GeoMatch, WeatherError> {
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::NotFound(city.to_string()))
}

fn place_label(city: &str, found: &GeoMatch) -> String {
    let name = found.name.clone().unwrap_or_else(|| city.to_string());
    match found.country.as_deref() {
        Some(country) if !country.is_empty() => format!("{name}, {country}"),
        _ => name,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoMatch {
    pub lat: f64,
    pub lon: f64,
    pub name: Option<String>,
    pub country: Option<String>,
}

/// `weather[i]` element shared by every OpenWeather payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherTag {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

/// Combined endpoint payload. Already close to the canonical shape.
#[derive(Debug, Default, Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub current: OcCurrent,
    #[serde(default)]
    pub hourly: Vec<OcHour>,
    #[serde(default)]
    pub daily: Vec<OcDay>,
    #[serde(default)]
    pub timezone_offset: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct OcCurrent {
    pub dt: Option<i64>,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
}

#[derive(Debug, Deserialize)]
pub struct OcHour {
    #[serde(default)]
    pub dt: i64,
    pub temp: Option<f64>,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
}

#[derive(Debug, Deserialize)]
pub struct OcDay {
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub temp: OcDayTemp,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OcDayTemp {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// `data/2.5/weather` payload, the "current" half of the split pair.
#[derive(Debug, Default, Deserialize)]
pub struct OwCurrentResponse {
    pub dt: Option<i64>,
    #[serde(default)]
    pub main: OwMain,
    #[serde(default)]
    pub wind: OwWind,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwMain {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwWind {
    pub speed: Option<f64>,
}

/// `data/2.5/forecast` payload: 3-hour-step entries, the "forecast" half of
/// the split pair.
#[derive(Debug, Default, Deserialize)]
pub struct OwForecastResponse {
    #[serde(default)]
    pub list: Vec<OwForecastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    #[serde(default)]
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_match_takes_first_candidate() {
        let candidates = vec![
            GeoMatch {
                lat: 51.5,
                lon: -0.1,
                name: Some("London".into()),
                country: Some("GB".into()),
            },
            GeoMatch { lat: 42.98, lon: -81.24, name: Some("London".into()), country: Some("CA".into()) },
        ];

        let found = best_match("London", candidates).expect("first candidate");
        assert_eq!(found.country.as_deref(), Some("GB"));
    }

    #[test]
    fn empty_candidates_is_not_found() {
        let err = best_match("Atlantis", Vec::new()).unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(city) if city == "Atlantis"));
    }

    #[test]
    fn label_falls_back_to_query_without_name_or_country() {
        let found = GeoMatch { lat: 0.0, lon: 0.0, name: None, country: None };
        assert_eq!(place_label("somewhere", &found), "somewhere");

        let found = GeoMatch { lat: 0.0, lon: 0.0, name: Some("Paris".into()), country: Some(String::new()) };
        assert_eq!(place_label("paris", &found), "Paris");

        let found = GeoMatch { lat: 0.0, lon: 0.0, name: Some("Paris".into()), country: Some("FR".into()) };
        assert_eq!(place_label("paris", &found), "Paris, FR");
    }

    #[test]
    fn decodes_geocoding_payload() {
        let body = r#"[{"name":"Kyiv","lat":50.4501,"lon":30.5234,"country":"UA","state":"Kyiv City"}]"#;
        let candidates: Vec<GeoMatch> = serde_json::from_str(body).expect("decode");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name.as_deref(), Some("Kyiv"));
    }

    #[test]
    fn decodes_combined_payload_with_missing_fields() {
        let body = r#"{
            "timezone_offset": 7200,
            "current": {"dt": 1700000000, "temp": 11.4, "weather": [{"main": "Clouds", "description": "overcast clouds"}]},
            "hourly": [{"dt": 1700000000, "temp": 11.4, "weather": []}],
            "daily": [{"dt": 1700000000, "temp": {"min": 6.0, "max": 13.2}, "weather": []}]
        }"#;
        let parsed: OneCallResponse = serde_json::from_str(body).expect("decode");

        assert_eq!(parsed.timezone_offset, 7200);
        assert_eq!(parsed.current.temp, Some(11.4));
        assert_eq!(parsed.current.feels_like, None);
        assert_eq!(parsed.hourly.len(), 1);
        assert_eq!(parsed.daily[0].temp.max, Some(13.2));
    }

    #[test]
    fn decodes_split_pair_payloads() {
        let current = r#"{
            "dt": 1700000000,
            "main": {"temp": 9.1, "feels_like": 7.3, "humidity": 81},
            "wind": {"speed": 4.6},
            "weather": [{"main": "Rain", "description": "light rain"}]
        }"#;
        let parsed: OwCurrentResponse = serde_json::from_str(current).expect("decode current");
        assert_eq!(parsed.main.humidity, Some(81));
        assert_eq!(parsed.wind.speed, Some(4.6));

        let forecast = r#"{"list": [
            {"dt": 1700000000, "main": {"temp": 9.0, "temp_min": 8.0, "temp_max": 10.0}, "weather": [{"main": "Rain", "description": "light rain"}]},
            {"dt": 1700010800, "main": {}, "weather": []}
        ]}"#;
        let parsed: OwForecastResponse = serde_json::from_str(forecast).expect("decode forecast");
        assert_eq!(parsed.list.len(), 2);
        assert_eq!(parsed.list[0].main.temp_min, Some(8.0));
        assert_eq!(parsed.list[1].main.temp, None);
    }
}
