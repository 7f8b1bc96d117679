use std::{fmt, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use weather_card_core::{
    Config, DisplaySurface, InputForm, RequestOrchestrator, Shortcut, SubmitOutcome,
    TemperatureUnit, ViewRenderer, WeatherClient, client_from_config,
};

use crate::terminal::{CardActions, TerminalSurface};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-card", version, about = "Current weather for a city")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides this).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Without a subcommand, starts the interactive prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show the weather card for one city and exit.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,

        /// Show temperatures in Celsius instead of Fahrenheit.
        #[arg(long)]
        celsius: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Some(Command::Configure) => configure().map(|()| ExitCode::SUCCESS),
            Some(Command::Show { city, celsius }) => show(&city, celsius).await,
            None => interactive().await.map(|()| ExitCode::SUCCESS),
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to remove the stored key")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build(
    config: &Config,
    unit: TemperatureUnit,
) -> Result<(RequestOrchestrator, Arc<TerminalSurface>)> {
    let client: Arc<dyn WeatherClient> = Arc::from(client_from_config(config)?);
    let terminal = Arc::new(TerminalSurface::new());

    let renderer = ViewRenderer::with_auto_hide(
        Arc::clone(&terminal) as Arc<dyn DisplaySurface>,
        config.error_auto_hide(),
    );
    let orchestrator =
        RequestOrchestrator::new(client, renderer, Arc::clone(&terminal) as Arc<dyn InputForm>)
            .with_unit(unit);

    Ok((orchestrator, terminal))
}

/// The card already explains any failure, so `show` only reports it through
/// the exit status.
async fn show(city: &str, celsius: bool) -> Result<ExitCode> {
    let config = Config::load()?;
    let unit = if celsius { TemperatureUnit::Celsius } else { TemperatureUnit::Fahrenheit };
    let (orchestrator, _terminal) = build(&config, unit)?;

    let outcome = orchestrator.submit(city).await;
    Ok(if succeeded(&outcome) { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn succeeded(outcome: &SubmitOutcome) -> bool {
    matches!(outcome, SubmitOutcome::Displayed(_))
}

/// Choices offered under a rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CardChoice {
    ToggleUnit(String),
    NewSearch,
    Retry(String),
}

impl fmt::Display for CardChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardChoice::ToggleUnit(label) | CardChoice::Retry(label) => f.write_str(label),
            CardChoice::NewSearch => f.write_str("New search"),
        }
    }
}

fn choices_for(actions: CardActions) -> Vec<CardChoice> {
    match actions {
        CardActions::Weather { toggle_label } => {
            vec![CardChoice::ToggleUnit(toggle_label), CardChoice::NewSearch]
        }
        CardActions::Error { retry_label } => vec![CardChoice::Retry(retry_label)],
    }
}

/// Result of a blocking prompt.
enum Prompted<T> {
    Value(T),
    /// Esc was pressed.
    Escape,
    /// Ctrl+C.
    Quit,
}

async fn prompt<T, F>(f: F) -> Result<Prompted<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(f)
        .await
        .context("Prompt task panicked")?;

    match answer {
        Ok(value) => Ok(Prompted::Value(value)),
        Err(InquireError::OperationCanceled) => Ok(Prompted::Escape),
        Err(InquireError::OperationInterrupted) => Ok(Prompted::Quit),
        Err(err) => Err(err).context("Failed to read from terminal"),
    }
}

async fn interactive() -> Result<()> {
    let config = Config::load()?;
    let (orchestrator, terminal) = build(&config, TemperatureUnit::default())?;

    println!("Enter a city name. Esc clears the card, Ctrl+C quits.");

    loop {
        let city = prompt(|| {
            Text::new("City:")
                .with_placeholder("e.g. Paris")
                .prompt()
        })
        .await?;

        match city {
            Prompted::Value(city) => {
                orchestrator.submit(&city).await;
            }
            Prompted::Escape => {
                orchestrator.handle_shortcut(Shortcut::Escape);
                continue;
            }
            Prompted::Quit => return Ok(()),
        }

        while let Some(actions) = terminal.pending_actions() {
            let options = choices_for(actions);
            let choice = prompt(move || Select::new("Next:", options).prompt()).await?;

            match choice {
                Prompted::Value(CardChoice::ToggleUnit(_)) => {
                    orchestrator.toggle_unit();
                }
                Prompted::Value(CardChoice::Retry(_)) => {
                    orchestrator.retry();
                    break;
                }
                Prompted::Value(CardChoice::NewSearch) => break,
                Prompted::Escape => {
                    orchestrator.handle_shortcut(Shortcut::Escape);
                    break;
                }
                Prompted::Quit => return Ok(()),
            }
        }
    }
}
