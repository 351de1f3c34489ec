//! Core library for the `citycast` weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The query controller that sequences current-conditions and forecast lookups
//! - Abstraction over the upstream weather source (OpenWeather by default)
//! - Display mapping (style keys, icon URLs, formatted times)
//!
//! It is used by `citycast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod presentation;
pub mod source;

pub use config::Config;
pub use controller::{QueryOutcome, WeatherQueryController};
pub use error::QueryError;
pub use model::{Condition, CurrentWeather, ForecastEntry, InputState, QueryState, Unit};
pub use presentation::StyleKey;
pub use source::{WeatherSource, openweather::OpenWeatherSource, source_from_config};
