//! Plain-text rendering of a [`QueryState`].

use chrono::Local;
use citycast_core::{
    QueryState,
    presentation::{current_view, forecast_views, toggle_label},
};

pub fn render(state: &QueryState) -> String {
    let unit = state.result_unit.unwrap_or(state.input.unit);
    let mut out = String::new();

    if let Some(error) = &state.error_message {
        out.push_str(&format!("Error: {error}\n"));
    }

    if let Some(current) = &state.current {
        let view = current_view(current, unit);
        out.push_str(&format!("== {} [{}] ==\n", view.title, view.style));
        if !view.description.is_empty() {
            out.push_str(&format!("{}\n", view.description));
        }
        out.push_str(&format!("{}\n{}\n{}\n", view.temperature, view.humidity, view.wind));
        if let Some(icon) = &view.icon_url {
            out.push_str(&format!("Icon: {icon}\n"));
        }
    }

    if let Some(warning) = &state.forecast_warning {
        out.push_str(&format!("Forecast unavailable: {warning}\n"));
    }

    if !state.upcoming.is_empty() {
        out.push_str("\n3-Hour Forecast (Next 24 Hours)\n");
        for entry in forecast_views(&state.upcoming, unit, &Local) {
            out.push_str(&format!(
                "  {}  {:>8}  {}\n",
                entry.time, entry.temperature, entry.description
            ));
        }
    }

    out.push_str(&format!("\n({})\n", toggle_label(state.input.unit)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use citycast_core::{CurrentWeather, ForecastEntry, Unit};

    #[test]
    fn renders_error_only() {
        let mut state = QueryState::new(Unit::Metric);
        state.error_message = Some("city not found".into());

        let out = render(&state);
        assert!(out.starts_with("Error: city not found"));
        assert!(!out.contains("Forecast"));
        assert!(out.contains("Switch to Fahrenheit"));
    }

    #[test]
    fn renders_current_and_forecast() {
        let mut state = QueryState::new(Unit::Imperial);
        state.result_unit = Some(Unit::Imperial);
        state.current = Some(CurrentWeather {
            location_name: "Paris".into(),
            condition: None,
            temperature: 54.5,
            humidity_pct: 80,
            wind_speed: 9.2,
        });
        state.upcoming = vec![ForecastEntry {
            timestamp: 1_700_000_000,
            condition: None,
            temperature: 50.0,
        }];

        let out = render(&state);
        assert!(out.contains("== Paris [bg-default] =="));
        assert!(out.contains("54.5°F"));
        assert!(out.contains("Wind: 9.2 mph"));
        assert!(out.contains("50°F"));
        assert!(out.contains("Switch to Celsius"));
    }

    #[test]
    fn renders_values_in_fetch_unit_after_toggle() {
        let mut state = QueryState::new(Unit::Metric);
        state.result_unit = Some(Unit::Metric);
        state.current = Some(CurrentWeather {
            location_name: "Oslo".into(),
            condition: None,
            temperature: 4.5,
            humidity_pct: 60,
            wind_speed: 2.0,
        });
        // Unit flipped, re-query not finished yet.
        state.input.unit = Unit::Imperial;

        let out = render(&state);
        assert!(out.contains("4.5°C"));
        assert!(out.contains("Wind: 2 m/s"));
        assert!(out.contains("Switch to Celsius"));
    }
}
