//! Display values derived from fetched weather data.
//!
//! Everything here is pure: no I/O and no access to controller state.

use chrono::{Local, TimeZone};

use crate::model::{Condition, CurrentWeather, ForecastEntry, Unit};

pub const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Presentation category for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
    Default,
}

impl StyleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKey::Clear => "bg-clear",
            StyleKey::Clouds => "bg-clouds",
            StyleKey::Rain => "bg-rain",
            StyleKey::Snow => "bg-snow",
            StyleKey::Thunderstorm => "bg-thunderstorm",
            StyleKey::Mist => "bg-mist",
            StyleKey::Default => "bg-default",
        }
    }
}

impl std::fmt::Display for StyleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Order matters: first match wins.
const STYLE_RULES: &[(&[&str], StyleKey)] = &[
    (&["clear"], StyleKey::Clear),
    (&["cloud"], StyleKey::Clouds),
    (&["rain", "drizzle"], StyleKey::Rain),
    (&["snow"], StyleKey::Snow),
    (&["thunder"], StyleKey::Thunderstorm),
    (&["mist", "fog"], StyleKey::Mist),
];

/// Map a condition name (e.g. OpenWeather's `main`) to a [`StyleKey`].
pub fn classify_condition(condition: Option<&str>) -> StyleKey {
    let Some(condition) = condition else {
        return StyleKey::Default;
    };
    let key = condition.to_lowercase();

    STYLE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| key.contains(n)))
        .map(|(_, style)| *style)
        .unwrap_or(StyleKey::Default)
}

/// `HH:MM` in the local timezone.
pub fn format_time(epoch_seconds: i64) -> String {
    format_time_in(epoch_seconds, &Local)
}

/// `HH:MM` of `epoch_seconds` in `tz`; `--:--` when the instant does not exist there.
pub fn format_time_in<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_opt(epoch_seconds, 0).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Icon image URL for an upstream icon id such as `"10d"`. Not validated.
pub fn icon_url(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}@2x.png")
}

/// Label of the control that switches to the other unit.
pub fn toggle_label(unit: Unit) -> &'static str {
    match unit {
        Unit::Metric => "Switch to Fahrenheit",
        Unit::Imperial => "Switch to Celsius",
    }
}

/// Temperature with the unit's suffix, e.g. `21.5°C`.
pub fn format_temperature(value: f64, unit: Unit) -> String {
    format!("{value}{}", unit.temperature_suffix())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub title: String,
    pub icon_url: Option<String>,
    pub description: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub style: StyleKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub time: String,
    pub icon_url: Option<String>,
    pub description: String,
    pub temperature: String,
}

fn icon_of(condition: Option<&Condition>) -> Option<String> {
    condition.map(|c| icon_url(&c.icon))
}

fn description_of(condition: Option<&Condition>) -> String {
    condition.map(|c| c.description.clone()).unwrap_or_default()
}

/// Display values for the current-conditions panel.
pub fn current_view(current: &CurrentWeather, unit: Unit) -> CurrentView {
    let condition = current.condition.as_ref();

    CurrentView {
        title: current.location_name.clone(),
        icon_url: icon_of(condition),
        description: description_of(condition),
        temperature: format_temperature(current.temperature, unit),
        humidity: format!("Humidity: {}%", current.humidity_pct),
        wind: format!("Wind: {} {}", current.wind_speed, unit.speed_suffix()),
        style: classify_condition(condition.map(|c| c.main.as_str())),
    }
}

/// One display row per forecast entry, times rendered in `tz`.
pub fn forecast_views<Tz: TimeZone>(entries: &[ForecastEntry], unit: Unit, tz: &Tz) -> Vec<ForecastView>
where
    Tz::Offset: std::fmt::Display,
{
    entries
        .iter()
        .map(|e| ForecastView {
            time: format_time_in(e.timestamp, tz),
            icon_url: icon_of(e.condition.as_ref()),
            description: description_of(e.condition.as_ref()),
            temperature: format_temperature(e.temperature, unit),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn classify_follows_rule_table() {
        let cases = [
            ("Clear", StyleKey::Clear),
            ("Clouds", StyleKey::Clouds),
            ("Rain", StyleKey::Rain),
            ("Drizzle", StyleKey::Rain),
            ("Snow", StyleKey::Snow),
            ("Thunderstorm", StyleKey::Thunderstorm),
            ("Mist", StyleKey::Mist),
            ("Fog", StyleKey::Mist),
            ("Haze", StyleKey::Default),
            ("", StyleKey::Default),
        ];

        for (input, expected) in cases {
            assert_eq!(classify_condition(Some(input)), expected, "input {input:?}");
        }
    }

    #[test]
    fn classify_absent_is_default() {
        assert_eq!(classify_condition(None), StyleKey::Default);
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(classify_condition(Some("HEAVY SNOW")), StyleKey::Snow);
        assert_eq!(classify_condition(Some("freezing fOg")), StyleKey::Mist);
    }

    #[test]
    fn classify_first_match_wins() {
        assert_eq!(classify_condition(Some("cloudy with rain")), StyleKey::Clouds);
        assert_eq!(classify_condition(Some("rain then clear")), StyleKey::Clear);
        assert_eq!(classify_condition(Some("thundersnow")), StyleKey::Snow);
    }

    #[test]
    fn style_key_names() {
        assert_eq!(StyleKey::Thunderstorm.as_str(), "bg-thunderstorm");
        assert_eq!(StyleKey::Default.to_string(), "bg-default");
    }

    #[test]
    fn format_time_is_hour_minute() {
        // 2023-11-14T22:13:20Z
        assert_eq!(format_time_in(1_700_000_000, &Utc), "22:13");

        let cet = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(format_time_in(1_700_000_000, &cet), "23:13");
    }

    #[test]
    fn format_time_local_has_hh_mm_shape() {
        let s = format_time(0);
        assert_eq!(s.len(), 5);
        assert_eq!(&s[2..3], ":");
    }

    #[test]
    fn icon_url_template() {
        assert_eq!(icon_url("10d"), "http://openweathermap.org/img/wn/10d@2x.png");
    }

    #[test]
    fn current_view_uses_unit_suffixes() {
        let current = CurrentWeather {
            location_name: "Paris".into(),
            condition: Some(Condition {
                id: 803,
                main: "Clouds".into(),
                description: "broken clouds".into(),
                icon: "04d".into(),
            }),
            temperature: 61.5,
            humidity_pct: 72,
            wind_speed: 8.05,
        };

        let view = current_view(&current, Unit::Imperial);
        assert_eq!(view.title, "Paris");
        assert_eq!(view.temperature, "61.5°F");
        assert_eq!(view.humidity, "Humidity: 72%");
        assert_eq!(view.wind, "Wind: 8.05 mph");
        assert_eq!(view.style, StyleKey::Clouds);
        assert_eq!(view.icon_url.as_deref(), Some("http://openweathermap.org/img/wn/04d@2x.png"));
    }

    #[test]
    fn current_view_without_condition() {
        let current = CurrentWeather {
            location_name: "X".into(),
            condition: None,
            temperature: 3.0,
            humidity_pct: 0,
            wind_speed: 0.0,
        };
        let view = current_view(&current, Unit::Metric);
        assert_eq!(view.style, StyleKey::Default);
        assert!(view.icon_url.is_none());
        assert_eq!(view.temperature, "3°C");
        assert_eq!(view.description, "");
    }

    #[test]
    fn forecast_views_format_each_entry() {
        let entries = vec![
            ForecastEntry { timestamp: 1_700_000_000, condition: None, temperature: 10.0 },
            ForecastEntry { timestamp: 1_700_010_800, condition: None, temperature: 8.5 },
        ];
        let views = forecast_views(&entries, Unit::Metric, &Utc);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].time, "22:13");
        assert_eq!(views[1].time, "01:13");
        assert_eq!(views[1].temperature, "8.5°C");
    }

    #[test]
    fn toggle_label_names_the_other_unit() {
        assert_eq!(toggle_label(Unit::Metric), "Switch to Fahrenheit");
        assert_eq!(toggle_label(Unit::Imperial), "Switch to Celsius");
    }
}
