//! Core library for the `quickweather` CLI.
//!
//! This crate defines:
//! - Preferences and credentials handling
//! - Abstraction over weather sources (credentialed and keyless)
//! - The canonical snapshot model and the normalization into it
//! - The sparkline quantizer used by the hourly temperature strip
//!
//! It is used by `quickweather-cli`, but can also be reused by other binaries
//! or services.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod spark;

pub use config::{ApiCredentials, Preferences};
pub use error::WeatherError;
pub use model::{Condition, Place, Units, WeatherSnapshot};
pub use provider::{KeylessReport, Payload, Report, WeatherSource, source_for};
