use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    error::QueryError,
    model::{Condition, CurrentWeather, ForecastEntry, Unit},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    async fn fetch_body(&self, name: &str, city: &str, unit: Unit) -> Result<String, QueryError> {
        let url = self.endpoint(name);
        debug!(endpoint = name, city, unit = unit.as_str(), "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", unit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                QueryError::Transport(format!("Failed to reach OpenWeather ({name}): {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            QueryError::Transport(format!("Failed to read OpenWeather {name} response: {e}"))
        })?;

        if !status.is_success() {
            warn!(endpoint = name, %status, body = %truncate_body(&body), "OpenWeather rejected request");
            return Err(QueryError::rejected(status.as_u16(), &body));
        }

        Ok(body)
    }
}

fn parse_body<T: DeserializeOwned>(name: &str, body: &str) -> Result<T, QueryError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(endpoint = name, body = %truncate_body(body), "unparsable OpenWeather body");
        QueryError::Malformed(format!("Failed to parse OpenWeather {name} JSON: {e}"))
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

impl From<OwWeather> for Condition {
    fn from(w: OwWeather) -> Self {
        Condition {
            id: w.id,
            main: w.main,
            description: w.description,
            icon: w.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(parsed: OwCurrentResponse) -> Self {
        CurrentWeather {
            location_name: parsed.name,
            condition: parsed.weather.into_iter().next().map(Condition::from),
            temperature: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn current(&self, city: &str, unit: Unit) -> Result<CurrentWeather, QueryError> {
        let body = self.fetch_body("weather", city, unit).await?;
        let parsed: OwCurrentResponse = parse_body("weather", &body)?;
        Ok(parsed.into())
    }

    async fn forecast(&self, city: &str, unit: Unit) -> Result<Vec<ForecastEntry>, QueryError> {
        let body = self.fetch_body("forecast", city, unit).await?;
        let parsed: OwForecastResponse = parse_body("forecast", &body)?;

        Ok(parsed
            .list
            .into_iter()
            .map(|e| ForecastEntry {
                timestamp: e.dt,
                condition: e.weather.into_iter().next().map(Condition::from),
                temperature: e.main.temp,
            })
            .collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
