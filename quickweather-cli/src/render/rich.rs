//! Colorized renderer: same information as the plain renderer, styled with
//! crossterm (bold cyan header, dim timestamps, bold day labels).

use chrono::Local;
use crossterm::style::Stylize;
use quickweather_core::{
    KeylessReport, Units, WeatherSnapshot,
    provider::{Payload, Report},
};

use super::{
    Renderer, capitalize, condition_line, day_label, hourly_temps, human_time,
    keyless_day_label, round_or_zero, spark_line,
};

const LABEL_WIDTH: usize = 11;

#[derive(Debug, Default)]
pub struct RichRenderer;

impl Renderer for RichRenderer {
    fn render(&self, report: &Report, units: Units) -> Vec<String> {
        match &report.payload {
            Payload::Forecast(snapshot) => forecast_lines(snapshot, &report.label, units),
            Payload::Keyless(keyless) => keyless_lines(keyless, &report.label, units),
        }
    }
}

/// Label column padded before styling; escape codes would break alignment
/// if the padding were applied to the styled string.
fn row(label: &str, value: impl std::fmt::Display) -> String {
    let padded = format!("{label:<width$}", width = LABEL_WIDTH);
    format!("{} {value}", padded.dark_grey())
}

fn forecast_lines(snapshot: &WeatherSnapshot, label: &str, units: Units) -> Vec<String> {
    let u = units.temp_suffix();
    let tz = snapshot.timezone_offset;
    let cur = &snapshot.current;

    let mut lines = Vec::new();
    lines.push(format!(
        "{}  {}",
        label.bold().cyan(),
        human_time(cur.timestamp, tz).dim()
    ));
    lines.push(String::new());
    lines.push(row("Condition", condition_line(cur.condition, &cur.description)));
    lines.push(row(
        "Temp",
        format!("{}{u} (feels {}{u})", round_or_zero(cur.temp), round_or_zero(cur.feels_like)),
    ));
    let humidity = cur.humidity.map_or_else(|| "—".to_string(), |h| h.to_string());
    lines.push(row("Humidity", format!("{humidity}%")));
    lines.push(row(
        "Wind",
        format!("{} {}", round_or_zero(cur.wind_speed), units.wind_suffix()),
    ));
    match spark_line(&hourly_temps(snapshot), units) {
        Some(line) => lines.push(row("Next 24h", line)),
        None => lines.push(row("Next 24h", "—")),
    }

    lines.push(String::new());
    lines.push("3-day forecast:".bold().to_string());
    for day in snapshot.daily.iter().skip(1).take(3) {
        lines.push(format!(
            "{}  {:<18} {}{u}/{}{u}",
            day_label(day.timestamp, tz).bold(),
            capitalize(&day.description),
            round_or_zero(day.temp_max),
            round_or_zero(day.temp_min)
        ));
    }
    lines
}

fn keyless_lines(report: &KeylessReport, label: &str, units: Units) -> Vec<String> {
    let u = units.temp_suffix();

    let mut lines = Vec::new();
    lines.push(format!(
        "{}  {}",
        label.bold().green(),
        Local::now().format("%Y-%m-%d %H:%M").to_string().dim()
    ));
    lines.push(String::new());
    if let Some(cur) = report.current_condition.first() {
        lines.push(row("Condition", capitalize(cur.description())));
        lines.push(row(
            "Temp",
            format!(
                "{}{u} (feels {}{u})",
                cur.temp(units).unwrap_or("—"),
                cur.feels_like(units).unwrap_or("—")
            ),
        ));
        lines.push(row("Humidity", format!("{}%", cur.humidity.as_deref().unwrap_or("—"))));
    }

    lines.push(String::new());
    lines.push("3-day forecast:".bold().to_string());
    for day in report.weather.iter().skip(1).take(3) {
        lines.push(format!(
            "{}  {}{u}/{}{u}",
            keyless_day_label(&day.date).bold(),
            day.max_temp(units).unwrap_or("—"),
            day.min_temp(units).unwrap_or("—")
        ));
    }
    lines
}
