//! Query controller: owns the input/result state and runs lookups against a
//! [`WeatherSource`].
//!
//! Every accepted query gets a sequence number. A query only writes state while
//! its number is still the latest issued one, so a slow response can never
//! overwrite the result of a query started after it.

use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    error::QueryError,
    model::{FORECAST_WINDOW, QueryState, Unit},
    source::WeatherSource,
};

/// How a call to [`WeatherQueryController::run_query`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Blank city text; nothing was requested or changed.
    Skipped,
    /// Current conditions stored (the forecast may still carry a warning).
    Completed,
    /// Current conditions failed; the error message is stored.
    Failed(QueryError),
    /// A newer query was issued while this one was in flight.
    Superseded,
}

#[derive(Debug)]
struct Inner {
    state: QueryState,
    issued: u64,
}

#[derive(Debug)]
pub struct WeatherQueryController {
    source: Arc<dyn WeatherSource>,
    inner: Mutex<Inner>,
}

impl WeatherQueryController {
    pub fn new(source: Arc<dyn WeatherSource>, unit: Unit) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: QueryState::new(unit),
                issued: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> QueryState {
        self.inner.lock().await.state.clone()
    }

    pub async fn set_city(&self, text: impl Into<String>) {
        self.inner.lock().await.state.input.city_text = text.into();
    }

    /// Query with whatever city and unit are currently entered.
    pub async fn submit(&self) -> QueryOutcome {
        let input = self.inner.lock().await.state.input.clone();
        self.run_query(&input.city_text, input.unit).await
    }

    /// Flip the unit and, if a city is entered, schedule one re-query with the new unit.
    ///
    /// The re-query runs as a separate task. It receives the city and the new
    /// unit as arguments and never reads them back from shared state.
    pub async fn toggle_unit(self: &Arc<Self>) -> Option<JoinHandle<QueryOutcome>> {
        let (city, unit) = {
            let mut inner = self.inner.lock().await;
            let unit = inner.state.input.unit.toggled();
            inner.state.input.unit = unit;
            (inner.state.input.city_text.clone(), unit)
        };
        debug!(unit = unit.as_str(), "unit toggled");

        if city.trim().is_empty() {
            return None;
        }

        let this = Arc::clone(self);
        Some(tokio::spawn(async move { this.run_query(&city, unit).await }))
    }

    /// Fetch current conditions, then the forecast, for `city_text` in `unit`.
    pub async fn run_query(&self, city_text: &str, unit: Unit) -> QueryOutcome {
        let city = city_text.trim();
        if city.is_empty() {
            return QueryOutcome::Skipped;
        }

        let seq = {
            let mut inner = self.inner.lock().await;
            inner.issued += 1;
            inner.state.error_message = None;
            inner.state.forecast_warning = None;
            inner.issued
        };
        debug!(seq, city, unit = unit.as_str(), "query issued");

        let current = match self.source.current(city, unit).await {
            Ok(current) => current,
            Err(err) => {
                let mut inner = self.inner.lock().await;
                if inner.issued != seq {
                    return superseded(seq);
                }
                warn!(seq, city, error = %err, "current conditions failed");
                inner.state.current = None;
                inner.state.upcoming.clear();
                inner.state.result_unit = None;
                inner.state.error_message = Some(err.to_string());
                return QueryOutcome::Failed(err);
            }
        };

        {
            let mut inner = self.inner.lock().await;
            if inner.issued != seq {
                return superseded(seq);
            }
            // Drop the previous query's forecast together with its current conditions.
            inner.state.current = Some(current);
            inner.state.upcoming.clear();
            inner.state.result_unit = Some(unit);
        }

        let forecast = self.source.forecast(city, unit).await;

        let mut inner = self.inner.lock().await;
        if inner.issued != seq {
            return superseded(seq);
        }
        match forecast {
            Ok(mut entries) => {
                entries.truncate(FORECAST_WINDOW);
                inner.state.upcoming = entries;
            }
            Err(err) => {
                warn!(seq, city, error = %err, "forecast failed; keeping current conditions");
                inner.state.upcoming.clear();
                inner.state.forecast_warning = Some(err.to_string());
            }
        }

        QueryOutcome::Completed
    }
}

fn superseded(seq: u64) -> QueryOutcome {
    warn!(seq, "discarding response of superseded query");
    QueryOutcome::Superseded
}
