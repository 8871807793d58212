use serde::{Deserialize, Serialize};

/// Unit system used for API requests and display suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter understood by OpenWeather.
    pub fn api_value(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temp_suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_suffix(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }
}

impl std::str::FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Weather condition category, as reported in OpenWeather's `weather[0].main`
/// group field. Anything outside the known set maps to `Unknown`, which
/// renders without an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Clear,
    Clouds,
    Mist,
    Smoke,
    Haze,
    Fog,
    Dust,
    Ash,
    Squall,
    Tornado,
    #[default]
    Unknown,
}

impl Condition {
    pub fn from_group(group: &str) -> Self {
        match group {
            "Thunderstorm" => Condition::Thunderstorm,
            "Drizzle" => Condition::Drizzle,
            "Rain" => Condition::Rain,
            "Snow" => Condition::Snow,
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Mist" => Condition::Mist,
            "Smoke" => Condition::Smoke,
            "Haze" => Condition::Haze,
            "Fog" => Condition::Fog,
            "Dust" => Condition::Dust,
            "Ash" => Condition::Ash,
            "Squall" => Condition::Squall,
            "Tornado" => Condition::Tornado,
            _ => Condition::Unknown,
        }
    }
}

/// Location requested by the user, either by name or by explicit coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    City(String),
    Coords { lat: f64, lon: f64 },
}

impl Place {
    /// Display label used when no better label (e.g. a geocoded name) exists.
    pub fn label(&self) -> String {
        match self {
            Place::City(city) => city.clone(),
            Place::Coords { lat, lon } => format!("Lat {lat:.3}, Lon {lon:.3}"),
        }
    }
}

/// Canonical, provider-independent weather data for one run.
///
/// `hourly` and `daily` are always present; an empty vec means the provider
/// had no data, never that the field was omitted. Temperatures stay `None`
/// when the provider omits them; display defaults are applied only in the
/// presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    /// Chronological, at most 24 entries. May contain repeated entries when
    /// derived from a 3-hour feed (accepted approximation).
    pub hourly: Vec<HourlySample>,
    /// One entry per calendar day, ascending. Index 0 is "today" only when
    /// the source naturally includes it.
    pub daily: Vec<DailyForecast>,
    /// Signed seconds from UTC, used only for display-time conversion.
    pub timezone_offset: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentConditions {
    pub timestamp: i64,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_speed: Option<f64>,
    pub condition: Condition,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlySample {
    pub timestamp: i64,
    pub temp: Option<f64>,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub timestamp: i64,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub condition: Condition,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_roundtrip_through_api_value() {
        for units in [Units::Metric, Units::Imperial] {
            let parsed: Units = units.api_value().parse().expect("roundtrip should succeed");
            assert_eq!(units, parsed);
        }
    }

    #[test]
    fn unknown_units_error() {
        let err = "kelvin".parse::<Units>().unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(Units::Metric.toggled(), Units::Imperial);
        assert_eq!(Units::Imperial.toggled(), Units::Metric);
    }

    #[test]
    fn condition_parses_known_groups() {
        assert_eq!(Condition::from_group("Rain"), Condition::Rain);
        assert_eq!(Condition::from_group("Clear"), Condition::Clear);
        assert_eq!(Condition::from_group("Tornado"), Condition::Tornado);
    }

    #[test]
    fn condition_defaults_to_unknown() {
        assert_eq!(Condition::from_group("Volcano"), Condition::Unknown);
        assert_eq!(Condition::from_group(""), Condition::Unknown);
    }

    #[test]
    fn coords_label_uses_three_decimals() {
        let place = Place::Coords { lat: 51.5074, lon: -0.1278 };
        assert_eq!(place.label(), "Lat 51.507, Lon -0.128");
    }
}
