use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{Config, LookupError, ProviderId, ViewStateController};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City weather lookup")]
pub struct Cli {
    /// Log provider requests and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "openweather" or "opencage".
        provider: String,
    },

    /// Show weather and region details for a city.
    Show {
        /// City name; the configured default city when absent.
        city: Option<String>,

        /// Print the view state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly from a prompt, starting with the default city.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { city, json } => show(city.as_deref(), json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::load()?.with_env_overrides();
    tracing::debug!(
        default_city = config.default_city(),
        providers = config.providers.len(),
        "configuration loaded"
    );
    Ok(config)
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;
    if config.is_provider_configured(id) {
        println!("Replacing the saved {id} API key.");
    }

    let api_key = Password::new(&format!("{id} API key:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.upsert_provider_api_key(id, api_key.to_string());
    let path = config.save()?;

    println!("Saved {id} credentials to {}", path.display());
    Ok(())
}

async fn show(city: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let mut controller = ViewStateController::from_config(&config)?;

    let searched = match city {
        Some(city) => controller.search(city).await,
        None => controller.mount().await,
    };
    render::alerted(searched)?;
    controller.settle().await;

    if json {
        render::print_json(controller.state())?;
    } else {
        render::print_state(controller.state());
    }
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = load_config()?;
    let mut controller = ViewStateController::from_config(&config)?;

    if let Err(err) = controller.mount().await {
        render::alert(&err);
    }
    controller.settle().await;
    render::print_state(controller.state());

    loop {
        let input = match Text::new("Search").with_placeholder("city name").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search input"),
        };

        match controller.search(&input).await {
            Ok(_) => {
                controller.settle().await;
                render::print_state(controller.state());
            }
            Err(err @ LookupError::UserInput) => render::alert(&err),
            Err(err) => {
                render::alert(&err);
                render::print_state(controller.state());
            }
        }
    }

    Ok(())
}
