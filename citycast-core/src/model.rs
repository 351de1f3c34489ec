use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Number of upstream forecast entries kept per query (~24h at 3h steps).
pub const FORECAST_WINDOW: usize = 8;

/// Measurement system used both for the upstream request and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    /// Value of the upstream `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Metric, Unit::Imperial]
    }

    pub fn toggled(self) -> Self {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Metric,
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Unit::Metric => "m/s",
            Unit::Imperial => "mph",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Unit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Unit::Metric),
            "imperial" => Ok(Unit::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

/// Primary weather condition as reported upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub condition: Option<Condition>,
    pub temperature: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Epoch seconds.
    pub timestamp: i64,
    pub condition: Option<Condition>,
    pub temperature: f64,
}

/// What the user has typed and selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub city_text: String,
    pub unit: Unit,
}

impl InputState {
    pub fn has_city(&self) -> bool {
        !self.city_text.trim().is_empty()
    }
}

/// Everything the controller knows after the latest completed query.
///
/// After a query finishes exactly one of `current` and `error_message` is set.
/// `upcoming` is only non-empty alongside a `current` from the same query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub input: InputState,
    pub current: Option<CurrentWeather>,
    pub upcoming: Vec<ForecastEntry>,
    /// Unit `current` and `upcoming` were fetched in; `None` when there are no results.
    pub result_unit: Option<Unit>,
    pub error_message: Option<String>,
    /// Set when current conditions loaded but the forecast call failed.
    pub forecast_warning: Option<String>,
}

impl QueryState {
    pub fn new(unit: Unit) -> Self {
        Self {
            input: InputState {
                city_text: String::new(),
                unit,
            },
            ..Self::default()
        }
    }
}
