use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use meteo_core::{Config, SearchOutcome, Session, UnitSystem, Units, provider_from_config};

use crate::{configure, interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Look up the weather for a place")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and the forecast for a place.
    Show {
        /// Place name, e.g. "Paris" or "New York".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Display in °F, mph and inches.
        #[arg(long, conflicts_with = "metric")]
        imperial: bool,

        /// Display in °C, km/h and mm.
        #[arg(long)]
        metric: bool,

        /// Day whose hourly forecast to list (YYYY-MM-DD); defaults to the first forecast day.
        #[arg(long)]
        day: Option<NaiveDate>,

        /// Print the normalized snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly in one session, with history and unit switching.
    Interactive,

    /// Edit the configuration file interactively.
    Configure,

    /// Print the configuration file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { query, imperial, metric, day, json } => {
                let config = Config::load().context("Failed to load configuration")?;
                let system = match (imperial, metric) {
                    (true, _) => UnitSystem::Imperial,
                    (_, true) => UnitSystem::Metric,
                    _ => config.units,
                };
                show(&config, &query.join(" "), Units::for_system(system), day, json).await
            }
            Command::Interactive => {
                let config = Config::load().context("Failed to load configuration")?;
                interactive::run(&config).await
            }
            Command::Configure => configure::run(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(
    config: &Config,
    query: &str,
    units: Units,
    day: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let provider = provider_from_config(config).context("Failed to set up weather provider")?;
    let mut session = Session::new(provider, units);

    match session.search(query).await {
        SearchOutcome::Ignored => Err(anyhow!("Search text must not be blank")),
        SearchOutcome::NoResults => {
            println!("No results found for \"{}\".", query.trim());
            Ok(())
        }
        SearchOutcome::Failed { message } => {
            Err(anyhow!("Could not fetch weather for \"{query}\": {message}"))
        }
        SearchOutcome::Loaded { .. } => {
            if let Some(day) = day {
                session.select_day(day.and_time(chrono::NaiveTime::MIN));
            }

            if json {
                let snapshot = session
                    .snapshot()
                    .ok_or_else(|| anyhow!("Forecast was loaded but is no longer available"))?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?
                );
            } else {
                print!("{}", render::session(&session));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_joins_multi_word_query() {
        let cli = Cli::try_parse_from(["meteo", "show", "New", "York", "--imperial"]).unwrap();
        match cli.command {
            Command::Show { query, imperial, metric, day, json } => {
                assert_eq!(query.join(" "), "New York");
                assert!(imperial);
                assert!(!metric);
                assert!(day.is_none());
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_parses_day() {
        let cli = Cli::try_parse_from(["meteo", "show", "Oslo", "--day", "2024-01-02"]).unwrap();
        match cli.command {
            Command::Show { day, .. } => {
                assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unit_flags_conflict() {
        assert!(Cli::try_parse_from(["meteo", "show", "Oslo", "--imperial", "--metric"]).is_err());
    }

    #[test]
    fn show_requires_query() {
        assert!(Cli::try_parse_from(["meteo", "show"]).is_err());
    }

    #[test]
    fn verbose_is_global_and_counts() {
        let cli = Cli::try_parse_from(["meteo", "interactive", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
