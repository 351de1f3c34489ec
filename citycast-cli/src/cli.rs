use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use citycast_core::{
    Config, QueryOutcome, Unit, WeatherQueryController, source_from_config,
};
use inquire::{InquireError, Password, Select, Text};
use tracing::debug;

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default unit.
    Configure,

    /// Show current weather and the next 24h forecast for a city.
    Show {
        /// City name, e.g. "Paris" or "Paris,FR".
        city: String,

        /// "metric" or "imperial"; defaults to the configured unit.
        #[arg(long)]
        unit: Option<String>,
    },

    /// Prompt for cities repeatedly; `:unit` toggles units, `:quit` exits.
    Interactive {
        /// "metric" or "imperial"; defaults to the configured unit.
        #[arg(long)]
        unit: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, unit } => {
                let config = Config::load()?;
                let unit = resolve_unit(&config, unit.as_deref())?;
                show(&config, &city, unit).await
            }
            Command::Interactive { unit } => {
                let config = Config::load()?;
                let unit = resolve_unit(&config, unit.as_deref())?;
                interactive(&config, unit).await
            }
        }
    }
}

fn resolve_unit(config: &Config, flag: Option<&str>) -> anyhow::Result<Unit> {
    match flag {
        Some(s) => Unit::try_from(s),
        None => Ok(config.default_unit),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim().to_string());

    let choice = Select::new("Default unit:", Unit::all().to_vec())
        .prompt()
        .context("Failed to read default unit")?;
    config.default_unit = choice;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(config: &Config, city: &str, unit: Unit) -> anyhow::Result<()> {
    let controller = WeatherQueryController::new(source_from_config(config)?, unit);
    controller.set_city(city).await;

    if controller.submit().await == QueryOutcome::Skipped {
        anyhow::bail!("City name must not be empty");
    }

    print!("{}", render(&controller.snapshot().await));
    Ok(())
}

async fn interactive(config: &Config, unit: Unit) -> anyhow::Result<()> {
    let controller = Arc::new(WeatherQueryController::new(source_from_config(config)?, unit));

    loop {
        let line = match Text::new("City:")
            .with_help_message(":unit toggles metric/imperial, :quit exits")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let outcome = match line.trim() {
            ":quit" | ":q" => break,
            ":unit" | ":u" => match controller.toggle_unit().await {
                Some(handle) => Some(handle.await.context("Re-query task failed")?),
                None => {
                    let unit = controller.snapshot().await.input.unit;
                    println!("Unit set to {unit}");
                    None
                }
            },
            city => {
                controller.set_city(city).await;
                Some(controller.submit().await)
            }
        };
        debug!(?outcome, "prompt handled");

        if matches!(outcome, Some(QueryOutcome::Completed | QueryOutcome::Failed(_))) {
            print!("{}", render(&controller.snapshot().await));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_unit() {
        let cli = Cli::try_parse_from(["citycast", "show", "Paris", "--unit", "imperial"]).unwrap();
        match cli.command {
            Command::Show { city, unit } => {
                assert_eq!(city, "Paris");
                assert_eq!(unit.as_deref(), Some("imperial"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn resolve_unit_prefers_flag_over_config() {
        let mut config = Config::default();
        config.default_unit = Unit::Imperial;

        assert_eq!(resolve_unit(&config, None).unwrap(), Unit::Imperial);
        assert_eq!(resolve_unit(&config, Some("metric")).unwrap(), Unit::Metric);
        assert!(resolve_unit(&config, Some("kelvin")).is_err());
    }
}
