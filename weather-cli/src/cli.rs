use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{
    Config, OpenWeatherProvider, SearchError, Session, Unit, View, ViewOptions, WeatherProvider,
    qualifies,
};

use crate::{render, repl};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather for a place name.
    Show {
        /// City or country, at least 3 characters.
        query: String,

        /// Display unit; defaults to the configured one.
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },

    /// List place suggestions for partial input.
    Suggest {
        query: String,
    },

    /// Type to search, pick a suggestion, toggle units (default).
    Interactive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    #[value(name = "c")]
    Celsius,
    #[value(name = "f")]
    Fahrenheit,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Celsius => Unit::Celsius,
            UnitArg::Fahrenheit => Unit::Fahrenheit,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { query, unit } => {
                let config = Config::load()?.with_env_overrides();
                let mut session = Session::from_config(provider(&config)?, &config);
                if let Some(unit) = unit {
                    session.set_unit(unit.into());
                }

                session.set_query(query);
                // One-shot lookup; suggestions would go unused.
                session.cancel_suggestions();
                if qualifies(session.query()) {
                    render::loading();
                }
                session.search().await?;

                let view = View::build(&session, Utc::now(), &ViewOptions::from(&config));
                print!("{}", render::view(&view));
                Ok(())
            }
            Command::Suggest { query } => {
                let query = query.trim();
                if !qualifies(query) {
                    return Err(SearchError::QueryTooShort.into());
                }

                let config = Config::load()?.with_env_overrides();
                let provider = provider(&config)?;

                let suggestions = provider
                    .fetch_suggestions(query)
                    .await
                    .context("Failed to load suggestions.")?;

                if suggestions.is_empty() {
                    println!("No matches for \"{query}\".");
                }
                for (i, s) in suggestions.iter().enumerate() {
                    println!("{}. {}  ({:.4}, {:.4})", i + 1, s.label(), s.latitude, s.longitude);
                }
                Ok(())
            }
            Command::Interactive => {
                let config = Config::load()?.with_env_overrides();
                let session = Session::from_config(provider(&config)?, &config);
                repl::run(session, ViewOptions::from(&config)).await
            }
        }
    }
}

fn provider(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    Ok(Arc::new(OpenWeatherProvider::from_config(config)?))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
