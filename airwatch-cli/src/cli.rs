use std::fmt;

use airwatch_core::{
    Config, Dashboard, FileStore, KeyValueStore, MemoryStore, OpenWeatherProvider, RecentCities,
    SearchOutcome, provider_from_config,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::render::{RenderOptions, render_dashboard, render_recent};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "airwatch", version, about = "Weather & air quality dashboard")]
pub struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Keep recent searches in memory only.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Look up one city and print the dashboard.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// List recent searches.
    Recent,

    /// Search repeatedly, with recent cities as quick picks (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let opts = RenderOptions { color: !self.no_color };
        let config = Config::load()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(config),
            Command::Show { city } => {
                let dash = open_dashboard(&config, self.ephemeral)?;
                let outcome = dash.search(Some(&city)).await;
                print!("{}", render_dashboard(&dash.snapshot(), opts));
                outcome_status(&outcome)
            }
            Command::Recent => {
                let store = open_store(&config, self.ephemeral)?;
                let recent = RecentCities::load(store.as_ref());
                match render_recent(&recent) {
                    Some(line) => println!("{line}"),
                    None => println!("No recent searches."),
                }
                Ok(())
            }
            Command::Interactive => {
                let dash = open_dashboard(&config, self.ephemeral)?;
                interactive(&dash, opts).await
            }
        }
    }
}

/// A one-shot search that found nothing exits non-zero.
fn outcome_status(outcome: &SearchOutcome) -> anyhow::Result<()> {
    match outcome {
        SearchOutcome::Found => Ok(()),
        SearchOutcome::Failed(e) => anyhow::bail!("{}", e.user_message()),
        SearchOutcome::Busy => anyhow::bail!("another search is still running"),
    }
}

fn open_store(config: &Config, ephemeral: bool) -> anyhow::Result<Box<dyn KeyValueStore>> {
    if ephemeral {
        return Ok(Box::new(MemoryStore::new()));
    }
    let path = config.storage_path()?;
    tracing::debug!(path = %path.display(), "using recent-cities store");
    Ok(Box::new(FileStore::new(path)))
}

fn open_dashboard(
    config: &Config,
    ephemeral: bool,
) -> anyhow::Result<Dashboard<OpenWeatherProvider>> {
    let provider = provider_from_config(config)?;
    Ok(Dashboard::new(provider, open_store(config, ephemeral)?))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(key.to_string());
    config.save()?;
    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

enum Choice {
    Search,
    Recent(String),
    Quit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Search => f.write_str("Search a city"),
            Choice::Recent(city) => write!(f, "↻ {city}"),
            Choice::Quit => f.write_str("Quit"),
        }
    }
}

async fn interactive(
    dash: &Dashboard<OpenWeatherProvider>,
    opts: RenderOptions,
) -> anyhow::Result<()> {
    print!("{}", render_dashboard(&dash.snapshot(), opts));

    loop {
        let state = dash.snapshot();

        let mut choices = vec![Choice::Search];
        choices.extend(state.recent.iter().map(|c| Choice::Recent(c.to_string())));
        choices.push(Choice::Quit);

        let picked = match Select::new("What next?", choices).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Prompt failed"),
        };

        match picked {
            Choice::Search => {
                let text = match Text::new("City:")
                    .with_placeholder("Enter city name (e.g. London)")
                    .with_initial_value(&state.input)
                    .prompt()
                {
                    Ok(text) => text,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e).context("Prompt failed"),
                };
                dash.set_input(&text);
                dash.search(None).await;
            }
            Choice::Recent(city) => {
                dash.search(Some(&city)).await;
            }
            Choice::Quit => break,
        }

        println!();
        print!("{}", render_dashboard(&dash.snapshot(), opts));
    }

    Ok(())
}
