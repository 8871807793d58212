use crate::{
    config::ApiCredentials,
    error::WeatherError,
    model::{Place, Units, WeatherSnapshot},
    provider::{openweather::OpenWeatherSource, wttr::WttrSource},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;
pub mod wttr;

pub use wttr::KeylessReport;

/// What a source produced for one run: a display label for the resolved
/// location plus the payload to render.
#[derive(Debug)]
pub struct Report {
    pub label: String,
    pub payload: Payload,
}

/// Either a canonical snapshot or the keyless provider's own shape, which is
/// handed to the presentation layer unnormalized.
#[derive(Debug)]
pub enum Payload {
    Forecast(WeatherSnapshot),
    Keyless(KeylessReport),
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, place: &Place, units: Units) -> Result<Report, WeatherError>;
}

/// Pick the source for this run. With a credential the OpenWeather pipeline
/// (geocoding + combined endpoint with split fallback) is used; without one
/// the keyless provider takes over entirely.
pub fn source_for(credentials: &ApiCredentials) -> Box<dyn WeatherSource> {
    match &credentials.openweather_key {
        Some(key) => Box::new(OpenWeatherSource::new(key.clone())),
        None => Box::new(WttrSource::new()),
    }
}
