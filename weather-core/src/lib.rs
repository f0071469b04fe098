//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration (settings file + API key from the environment)
//! - The OpenWeather client behind the `WeatherSource` seam
//! - The `WeatherRecord` model and its text/HTML renderings
//! - Batch reporting (console, brief, log files) and the HTTP route
//!
//! It is used by `cityweather`, but can also be reused by other binaries or services.

pub mod batch;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod server;

#[cfg(test)]
mod testing;

pub use batch::{BatchSummary, LogBundle, LogFiles, LogReport};
pub use config::{Config, Settings};
pub use error::{LogWriteError, WeatherError};
pub use format::ClockStyle;
pub use model::WeatherRecord;
pub use provider::{OpenWeatherClient, WeatherSource};
