use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use weatherboard_core::{
    Config, Dashboard, FavoritesStore, FileSnapshotStore, Theme, UnitSystem, WeatherFetcher,
    provider::provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Weather dashboard for your favorite cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default unit system.
    Configure,

    /// Fetch a city's weather and add it to favorites.
    Add {
        /// City name, e.g. "London".
        city: String,

        /// Unit system for this fetch; defaults to the configured one.
        #[arg(long, value_parser = parse_unit)]
        unit: Option<UnitSystem>,
    },

    /// Remove a favorite by its city id.
    Remove { id: u64 },

    /// Show all favorite cities, most recently added first.
    List,

    /// Set the unit system used for future fetches.
    Unit {
        #[arg(value_parser = parse_unit)]
        unit: UnitSystem,
    },

    /// Set the card theme, or toggle it when no value is given.
    Theme {
        #[arg(value_parser = parse_theme)]
        theme: Option<Theme>,
    },
}

fn parse_unit(s: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(s).map_err(|e| e.to_string())
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::try_from(s).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Add { city, unit } => {
                let unit = unit.unwrap_or(config.unit);
                let provider = provider_from_config(&config)?;
                let mut dash = Dashboard::new(WeatherFetcher::new(provider), open_store()?, unit);

                match dash.add_city(&city).await {
                    Ok(Some(record)) => print!("{}", render::card(record, config.theme)),
                    Ok(None) => println!("Please enter a city name."),
                    Err(e) => {
                        tracing::debug!(error = ?e, "add failed");
                        anyhow::bail!("{}", e.user_message());
                    }
                }
            }
            Command::Remove { id } => {
                let mut store = open_store()?;
                match store.remove(id)? {
                    Some(record) => println!("Removed {} (#{}).", record.name, record.id),
                    None => println!("No favorite with id {id}."),
                }
            }
            Command::List => {
                let store = open_store()?;
                print!("{}", render::cards(store.records(), config.theme));
            }
            Command::Unit { unit } => {
                config.unit = unit;
                config.save()?;
                println!(
                    "Unit system set to {unit}. Cities already added keep the units they were fetched with."
                );
            }
            Command::Theme { theme } => {
                config.theme = theme.unwrap_or_else(|| config.theme.toggle());
                config.save()?;
                println!("Theme set to {}.", config.theme);
            }
        }

        Ok(())
    }
}

fn open_store() -> Result<FavoritesStore> {
    let dir = Config::data_dir()?;
    tracing::debug!(dir = %dir.display(), "opening favorites");
    Ok(FavoritesStore::open(Box::new(FileSnapshotStore::new(dir))))
}

fn configure(config: &mut Config) -> Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let units = vec![UnitSystem::Metric, UnitSystem::Imperial];
    let start = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    let unit = Select::new("Default unit system:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read unit system")?;

    config.set_api_key(api_key.trim().to_string());
    config.unit = unit;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
