//! Presentation layer: two interchangeable renderers over the same report.
//!
//! Both produce a sequence of display lines that the orchestrator prints;
//! the shared helpers here keep their output consistent (icons, time
//! formatting, display defaults for missing values).

use chrono::{DateTime, NaiveDate};
use quickweather_core::{
    Condition, Units, WeatherSnapshot,
    provider::Report,
    spark,
};

pub mod plain;
pub mod rich;

/// Sparkline width used by both renderers.
pub const SPARK_WIDTH: usize = 36;

pub trait Renderer {
    fn render(&self, report: &Report, units: Units) -> Vec<String>;
}

/// Pictograph for a condition category; unmapped categories get none.
pub fn icon(condition: Condition) -> &'static str {
    match condition {
        Condition::Thunderstorm => "⛈️",
        Condition::Drizzle => "🌦️",
        Condition::Rain => "🌧️",
        Condition::Snow => "❄️",
        Condition::Clear => "☀️",
        Condition::Clouds => "☁️",
        Condition::Mist
        | Condition::Smoke
        | Condition::Haze
        | Condition::Fog
        | Condition::Dust => "🌫️",
        Condition::Ash => "🌋",
        Condition::Squall => "🌬️",
        Condition::Tornado => "🌪️",
        Condition::Unknown => "",
    }
}

/// `2026-08-06 14:05` style timestamp, shifted by the display offset.
pub fn human_time(ts: i64, tz_offset: i64) -> String {
    DateTime::from_timestamp(ts + tz_offset, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// `Thu 06 Aug` style day label, shifted by the display offset.
pub fn day_label(ts: i64, tz_offset: i64) -> String {
    DateTime::from_timestamp(ts + tz_offset, 0)
        .map(|t| t.format("%a %d %b").to_string())
        .unwrap_or_default()
}

/// Day label for the keyless provider's `YYYY-MM-DD` date strings. An
/// unparseable date falls back to the raw string.
pub fn keyless_day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Sentence-case a provider description ("light rain" becomes "Light rain").
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Display default for temperatures and wind: absent shows as 0.
pub fn round_or_zero(value: Option<f64>) -> i64 {
    value.unwrap_or(0.0).round() as i64
}

/// Hourly temperatures that actually exist; the quantizer never sees gaps.
pub fn hourly_temps(snapshot: &WeatherSnapshot) -> Vec<f64> {
    snapshot.hourly.iter().filter_map(|h| h.temp).collect()
}

pub fn condition_line(condition: Condition, description: &str) -> String {
    let desc = capitalize(description);
    let glyph = icon(condition);
    if glyph.is_empty() { desc } else { format!("{glyph} {desc}") }
}

/// Sparkline plus rounded min/max markers, or `None` without samples.
pub fn spark_line(temps: &[f64], units: Units) -> Option<String> {
    if temps.is_empty() {
        return None;
    }
    let mn = temps.iter().copied().fold(f64::INFINITY, f64::min).round() as i64;
    let mx = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max).round() as i64;
    let u = units.temp_suffix();
    Some(format!("{}  min {mn}{u}  max {mx}{u}", spark::sparkline(temps, SPARK_WIDTH)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_condition_has_no_icon() {
        assert_eq!(icon(Condition::Unknown), "");
        assert_eq!(condition_line(Condition::Unknown, "odd sky"), "Odd sky");
    }

    #[test]
    fn condition_line_prefixes_known_icons() {
        assert_eq!(condition_line(Condition::Rain, "light rain"), "🌧️ Light rain");
    }

    #[test]
    fn human_time_applies_the_offset() {
        // 2021-01-01T00:00:00Z shifted by +2h.
        assert_eq!(human_time(1_609_459_200, 7_200), "2021-01-01 02:00");
    }

    #[test]
    fn keyless_labels_survive_bad_dates() {
        assert_eq!(keyless_day_label("2026-08-07"), "Fri 07 Aug");
        assert_eq!(keyless_day_label("not-a-date"), "not-a-date");
    }

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("Partly Cloudy"), "Partly cloudy");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn missing_values_round_to_zero() {
        assert_eq!(round_or_zero(None), 0);
        assert_eq!(round_or_zero(Some(12.6)), 13);
        assert_eq!(round_or_zero(Some(-0.4)), 0);
    }

    #[test]
    fn spark_line_is_none_without_samples() {
        assert!(spark_line(&[], Units::Metric).is_none());
        let line = spark_line(&[1.0, 9.6], Units::Metric).expect("samples present");
        assert!(line.contains("min 1°C"));
        assert!(line.contains("max 10°C"));
    }
}
