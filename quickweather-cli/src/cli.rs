use anyhow::Result;
use clap::Parser;
use quickweather_core::{ApiCredentials, Place, Preferences, Units, provider};
use thiserror::Error;

use crate::prompt;
use crate::render::{Renderer, plain::PlainRenderer, rich::RichRenderer};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "quickweather",
    version,
    about = "Current weather, hourly sparkline and 3-day forecast in the terminal"
)]
pub struct Cli {
    /// City to look up; several words are joined ("quickweather new york").
    /// Without a city the last one used (or an interactive prompt) applies.
    #[arg(value_name = "CITY")]
    pub city: Vec<String>,

    /// Latitude and longitude in decimal degrees, instead of a city name.
    #[arg(
        short = 'c',
        long,
        num_args = 2,
        value_names = ["LAT", "LON"],
        allow_negative_numbers = true,
        conflicts_with = "city"
    )]
    pub coords: Option<Vec<String>>,

    /// Colorized renderer instead of plain text.
    #[arg(long)]
    pub rich: bool,

    /// Override the stored unit system for this run (metric or imperial).
    #[arg(long)]
    pub units: Option<Units>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Bad coordinates. Usage: --coords LAT LON (decimal degrees)")]
    InvalidCoords,
}

impl Cli {
    /// Location requested on the command line, if any. Coordinates are kept
    /// as strings by clap so that malformed values produce a usage line and
    /// a clean exit instead of an argument-parser failure.
    fn requested_place(&self) -> Result<Option<Place>, CliError> {
        if let Some(pair) = &self.coords {
            let (lat, lon) = match (pair.first(), pair.get(1)) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => return Err(CliError::InvalidCoords),
            };
            let lat = lat.parse().map_err(|_| CliError::InvalidCoords)?;
            let lon = lon.parse().map_err(|_| CliError::InvalidCoords)?;
            return Ok(Some(Place::Coords { lat, lon }));
        }

        if self.city.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Place::City(self.city.join(" "))))
        }
    }

    pub async fn run(self, credentials: ApiCredentials) -> Result<()> {
        let mut prefs = Preferences::load();

        let place = match self.requested_place() {
            Ok(place) => place,
            Err(err) => {
                // Malformed arguments end the run before any fetch is
                // attempted, still exiting cleanly.
                println!("{err}");
                return Ok(());
            }
        };

        let place = match place {
            Some(place) => place,
            None => match prefs.last_city.clone() {
                Some(city) => Place::City(city),
                None => Place::City(prompt::ask_city(prompt::DEFAULT_CITY)),
            },
        };
        if let Place::City(city) = &place {
            prefs.last_city = Some(city.clone());
        }

        let stored = self.units.unwrap_or(prefs.units);
        let units = prompt::ask_units(stored);
        if units != stored {
            println!("Units set to {}", units.temp_suffix());
        }
        prefs.units = units;

        // Preferences are convenience state; save failures stay silent.
        let _ = prefs.save();

        let source = provider::source_for(&credentials);
        let renderer: Box<dyn Renderer> =
            if self.rich { Box::new(RichRenderer) } else { Box::new(PlainRenderer) };

        match source.fetch(&place, units).await {
            Ok(report) => {
                for line in renderer.render(&report, units) {
                    println!("{line}");
                }
            }
            Err(err) if err.is_network() => println!("Network/API error: {err}"),
            Err(err) => println!("Error: {err}"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_words_are_joined() {
        let cli = Cli::parse_from(["quickweather", "new", "york"]);
        let place = cli.requested_place().expect("valid args");
        assert_eq!(place, Some(Place::City("new york".to_string())));
    }

    #[test]
    fn no_arguments_means_no_place() {
        let cli = Cli::parse_from(["quickweather"]);
        assert_eq!(cli.requested_place().expect("valid args"), None);
    }

    #[test]
    fn coords_parse_including_negatives() {
        let cli = Cli::parse_from(["quickweather", "--coords", "51.5", "-0.1"]);
        let place = cli.requested_place().expect("valid args");
        assert_eq!(place, Some(Place::Coords { lat: 51.5, lon: -0.1 }));
    }

    #[test]
    fn malformed_coords_are_rejected_before_any_fetch() {
        let cli = Cli::parse_from(["quickweather", "--coords", "north", "west"]);
        let err = cli.requested_place().unwrap_err();
        assert!(err.to_string().contains("--coords LAT LON"));
    }

    #[test]
    fn units_flag_parses() {
        let cli = Cli::parse_from(["quickweather", "London", "--units", "imperial"]);
        assert_eq!(cli.units, Some(Units::Imperial));
    }

    #[test]
    fn rich_flag_defaults_off() {
        let cli = Cli::parse_from(["quickweather", "London"]);
        assert!(!cli.rich);
        let cli = Cli::parse_from(["quickweather", "London", "--rich"]);
        assert!(cli.rich);
    }
}
