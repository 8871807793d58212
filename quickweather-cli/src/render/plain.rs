//! Plain-text renderer: fixed-width rule lines, no styling. Output is
//! byte-stable so tests can assert on whole lines.

use chrono::Local;
use quickweather_core::{
    KeylessReport, Units, WeatherSnapshot,
    provider::{Payload, Report},
};

use super::{
    Renderer, capitalize, condition_line, day_label, hourly_temps, human_time,
    keyless_day_label, round_or_zero, spark_line,
};

const RULE_WIDTH: usize = 48;

#[derive(Debug, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, report: &Report, units: Units) -> Vec<String> {
        match &report.payload {
            Payload::Forecast(snapshot) => forecast_lines(snapshot, &report.label, units),
            Payload::Keyless(keyless) => keyless_lines(keyless, &report.label, units),
        }
    }
}

fn banner(lines: &mut Vec<String>) {
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(" Quick Weather - CLI with hourly sparkline".to_string());
    lines.push("=".repeat(RULE_WIDTH));
}

fn forecast_lines(snapshot: &WeatherSnapshot, label: &str, units: Units) -> Vec<String> {
    let u = units.temp_suffix();
    let tz = snapshot.timezone_offset;
    let cur = &snapshot.current;

    let mut lines = Vec::new();
    banner(&mut lines);
    lines.push(format!("Location: {label}"));
    lines.push(format!("Time: {}", human_time(cur.timestamp, tz)));
    lines.push(String::new());
    lines.push(condition_line(cur.condition, &cur.description));
    lines.push(format!(
        "Temp: {}{u}  Feels: {}{u}",
        round_or_zero(cur.temp),
        round_or_zero(cur.feels_like)
    ));
    let humidity = cur.humidity.map_or_else(|| "—".to_string(), |h| h.to_string());
    lines.push(format!(
        "Humidity: {humidity}%  Wind: {} {}",
        round_or_zero(cur.wind_speed),
        units.wind_suffix()
    ));
    lines.push("-".repeat(RULE_WIDTH));

    match spark_line(&hourly_temps(snapshot), units) {
        Some(line) => {
            lines.push("Next 24h:".to_string());
            lines.push(line);
        }
        None => lines.push("Next 24h: —".to_string()),
    }
    lines.push("-".repeat(RULE_WIDTH));

    lines.push("3-day forecast:".to_string());
    for day in snapshot.daily.iter().skip(1).take(3) {
        lines.push(format!(
            "{}: {:<18}  {}{u}/{}{u}",
            day_label(day.timestamp, tz),
            capitalize(&day.description),
            round_or_zero(day.temp_max),
            round_or_zero(day.temp_min)
        ));
    }
    lines.push("=".repeat(RULE_WIDTH));
    lines
}

fn keyless_lines(report: &KeylessReport, label: &str, units: Units) -> Vec<String> {
    let u = units.temp_suffix();

    let mut lines = Vec::new();
    banner(&mut lines);
    lines.push(format!("Location: {label}"));
    lines.push(format!("Time: {}", Local::now().format("%Y-%m-%d %H:%M")));
    lines.push(String::new());
    if let Some(cur) = report.current_condition.first() {
        lines.push(capitalize(cur.description()));
        lines.push(format!(
            "Temp: {}{u}  Feels: {}{u}",
            cur.temp(units).unwrap_or("—"),
            cur.feels_like(units).unwrap_or("—")
        ));
    }
    lines.push("-".repeat(RULE_WIDTH));
    lines.push("3-day forecast:".to_string());
    for day in report.weather.iter().skip(1).take(3) {
        lines.push(format!(
            "{}: {}{u}/{}{u}",
            keyless_day_label(&day.date),
            day.max_temp(units).unwrap_or("—"),
            day.min_temp(units).unwrap_or("—")
        ));
    }
    lines.push("=".repeat(RULE_WIDTH));
    lines
}
