use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::sync::Arc;
use tintwave_core::{Config, Controller, Label, Language, OpenWeatherSource};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tintwave", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Log request and state details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default language.
    Configure,

    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name, e.g. "Kyiv" or "London,GB".
        city: String,

        /// Display language (en, uk, de); defaults to the configured one.
        #[arg(long, value_parser = parse_language)]
        lang: Option<Language>,
    },

    /// Prompt for cities repeatedly. `:lang <code>` switches language, `:q` quits.
    Interactive {
        #[arg(long, value_parser = parse_language)]
        lang: Option<Language>,
    },
}

fn parse_language(value: &str) -> Result<Language, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lang } => {
                let mut controller = controller(lang)?;
                controller.submit(city);
                let state = controller.settle().await;
                print!("{}", render::render_state(state));
                Ok(())
            }
            Command::Interactive { lang } => interactive(controller(lang)?).await,
        }
    }
}

/// Build a controller from config; a missing API key is fatal here.
fn controller(lang: Option<Language>) -> anyhow::Result<Controller> {
    let config = Config::load()?.with_env();
    let api_key = config.require_api_key()?;
    let source = OpenWeatherSource::with_base_url(api_key.to_owned(), config.base_url());
    let lang = lang.unwrap_or_else(|| config.language());

    Ok(Controller::new(Arc::new(source), lang))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    let languages: Vec<&str> = Language::all().iter().map(|l| l.native_name()).collect();
    let current = Language::all()
        .iter()
        .position(|l| *l == config.language())
        .unwrap_or(0);
    let picked = Select::new("Default language:", languages)
        .with_starting_cursor(current)
        .raw_prompt()
        .context("Failed to read language")?;

    config.api_key = Some(api_key.trim().to_string());
    config.language = Language::all().get(picked.index).copied();

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    SetLanguage(Language),
    Submit(String),
}

fn parse_input(line: &str) -> anyhow::Result<Input> {
    let trimmed = line.trim();
    match trimmed.strip_prefix(':') {
        Some("q") | Some("quit") => Ok(Input::Quit),
        Some(rest) => match rest.split_once(' ') {
            Some(("lang", code)) => Ok(Input::SetLanguage(code.parse()?)),
            _ => anyhow::bail!("Unknown command ':{rest}'. Use ':lang <code>' or ':q'."),
        },
        None => Ok(Input::Submit(line.to_string())),
    }
}

async fn interactive(mut controller: Controller) -> anyhow::Result<()> {
    loop {
        let lang = controller.state().language();
        let line = match Text::new(&format!("{}:", Label::Prompt.text(lang))).prompt() {
            Ok(line) => line,
            Err(
                inquire::InquireError::OperationCanceled
                | inquire::InquireError::OperationInterrupted,
            ) => return Ok(()),
            Err(e) => return Err(e).context("Failed to read input"),
        };

        match parse_input(&line) {
            Ok(Input::Quit) => return Ok(()),
            Ok(Input::SetLanguage(lang)) => {
                controller.set_language(lang);
                tracing::debug!(
                    lang = %lang,
                    refetching = controller.state().is_loading(),
                    "display language changed"
                );
            }
            Ok(Input::Submit(text)) => controller.submit(text),
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        }

        if controller.state().is_loading() {
            println!("{}", Label::Loading.text(controller.state().language()));
        }
        let state = controller.settle().await;
        println!("{}", render::render_state(state));
    }
}
