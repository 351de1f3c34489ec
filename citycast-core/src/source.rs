use crate::{
    Config, CurrentWeather, ForecastEntry, QueryError, Unit,
    source::openweather::OpenWeatherSource,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Upstream that answers the two lookups a query needs.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Current conditions for `city`, in `unit`.
    async fn current(&self, city: &str, unit: Unit) -> Result<CurrentWeather, QueryError>;

    /// Full upstream forecast series for `city`, in `unit`, oldest first.
    async fn forecast(&self, city: &str, unit: Unit) -> Result<Vec<ForecastEntry>, QueryError>;
}

/// Construct the OpenWeather source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `citycast configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(Arc::new(OpenWeatherSource::new(
        api_key.to_owned(),
        config.base_url.clone(),
    )))
}
