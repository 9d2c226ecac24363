//! Command-line interface.
//!
//! One-shot `ask` and `forecast` subcommands, plus the interactive menu
//! that runs when no subcommand is given.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Select, Text};
use std::fmt;

use weather_advisor::advisor::{Advisor, NEED_LOCATION};
use weather_advisor::config::AppConfig;
use weather_advisor::intent::sanitize_location;
use weather_advisor::types::DEFAULT_FORECAST_DAYS;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-advisor", version, about = "Ask about the weather in plain English")]
pub struct Cli {
    /// Path to the TOML config file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer one question and exit.
    Ask {
        /// The question, e.g. "Do I need an umbrella tomorrow in Perth?"
        question: String,

        /// Place to use when the question names none.
        #[arg(long)]
        location: Option<String>,
    },

    /// Print current conditions and the daily forecast for a place.
    Forecast {
        location: String,

        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS)]
        days: u32,
    },

    /// Interactive menu (the default).
    Menu,
}

impl Cli {
    pub async fn run(self, advisor: &Advisor, config: &AppConfig) -> Result<()> {
        let default_location = config.advisor.default_location.as_deref();

        match self.command.unwrap_or(Command::Menu) {
            Command::Ask { question, location } => {
                let fallback = location.as_deref().or(default_location);
                println!("{}", advisor.ask(&question, fallback).await);
            }
            Command::Forecast { location, days } => {
                println!("{}", advisor.forecast_listing(&location, days).await);
            }
            Command::Menu => run_menu(advisor, default_location).await?,
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Interactive menu
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Summary,
    Ask,
    Quit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 3] = [MenuChoice::Summary, MenuChoice::Ask, MenuChoice::Quit];
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuChoice::Summary => "Current + forecast summary",
            MenuChoice::Ask => "Ask a question (natural language)",
            MenuChoice::Quit => "Quit",
        })
    }
}

/// `None` when the user backs out of a prompt (Esc or Ctrl-C).
fn answered<T>(result: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Prompt failed"),
    }
}

async fn run_menu(advisor: &Advisor, default_location: Option<&str>) -> Result<()> {
    println!("\n====== Weather Advisor ======");

    loop {
        let choice = answered(Select::new("Menu:", MenuChoice::ALL.to_vec()).prompt())?
            .unwrap_or(MenuChoice::Quit);

        match choice {
            MenuChoice::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            MenuChoice::Summary => {
                let Some(location) =
                    answered(Text::new("Enter city/location (e.g., Perth):").prompt())?
                else {
                    continue;
                };
                let Some(days) = answered(
                    CustomType::<u32>::new("How many forecast days (1-5)?")
                        .with_default(DEFAULT_FORECAST_DAYS)
                        .with_error_message("Please type a whole number")
                        .prompt(),
                )?
                else {
                    continue;
                };
                println!("\n{}\n", advisor.forecast_listing(&location, days).await);
            }
            MenuChoice::Ask => {
                let Some(question) = answered(
                    Text::new("Ask about the weather:")
                        .with_placeholder("Do I need an umbrella tomorrow in Perth?")
                        .prompt(),
                )?
                else {
                    continue;
                };

                let mut intent = advisor.interpret(&question, default_location).await;
                if intent.location.is_none() {
                    let Some(place) = answered(Text::new("Which location?").prompt())? else {
                        println!("\n{NEED_LOCATION}\n");
                        continue;
                    };
                    intent = intent.or_location(Some(sanitize_location(&place)));
                }
                println!("\n{}\n", advisor.answer(&intent).await);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
