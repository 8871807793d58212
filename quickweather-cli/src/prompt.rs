//! Interactive prompts. Every prompt degrades to its default when the run is
//! not attached to a terminal, so scripted invocations never block or fail.

use inquire::{Select, Text};
use quickweather_core::Units;

pub const DEFAULT_CITY: &str = "London";

/// Ask for a city when neither arguments nor stored preferences name one.
pub fn ask_city(default: &str) -> String {
    match Text::new("City:").with_default(default).prompt() {
        Ok(city) if !city.trim().is_empty() => city.trim().to_string(),
        Ok(_) | Err(_) => default.to_string(),
    }
}

/// One chance per run to flip the unit system before fetching.
pub fn ask_units(current: Units) -> Units {
    let toggle = format!("Switch to {}", current.toggled().temp_suffix());
    let options = vec!["Continue".to_string(), toggle.clone()];

    match Select::new("Options:", options).prompt() {
        Ok(choice) if choice == toggle => current.toggled(),
        Ok(_) | Err(_) => current,
    }
}
