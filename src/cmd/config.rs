use std::fmt::Display;
use std::str::FromStr;

use clap::{Args, Subcommand};

use crate::cmd::prompt::{PromptAction, prompt};
use crate::config::{
    AppConfig, DEFAULT_API_URL, DEFAULT_SEARCH_DEBOUNCE_MS, StoredConfig, config_file_path,
};
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Walk through every setting and save the answers.
    Init,
    /// Print the saved settings next to the values in effect.
    Show,
}

pub fn run(command: ConfigCommand, api_url_override: Option<String>) -> AppResult<()> {
    match command {
        ConfigCommand::Init => init(),
        ConfigCommand::Show => show(api_url_override),
    }
}

fn init() -> AppResult<()> {
    let mut stored = StoredConfig::load()?;
    println!("Enter keeps a value, '-' removes it.\n");

    ask(
        &format!("Ticket service URL (default {DEFAULT_API_URL})"),
        &mut stored.api_base_url,
    )?;
    ask(
        &format!("Search debounce, ms (default {DEFAULT_SEARCH_DEBOUNCE_MS})"),
        &mut stored.search_debounce_ms,
    )?;
    ask("Request timeout, seconds (0 or empty: none)", &mut stored.request_timeout_secs)?;
    ask("Log level (error, warn, info, debug, trace)", &mut stored.log_level)?;

    stored.save()?;
    println!("\nSaved {}", config_file_path()?.display());
    Ok(())
}

fn show(api_url_override: Option<String>) -> AppResult<()> {
    let stored = StoredConfig::load()?;
    let effective = AppConfig::load(api_url_override)?;

    println!("{}", config_file_path()?.display());
    let rows = [
        (
            "api_base_url",
            saved(&stored.api_base_url),
            effective.api_base_url.clone(),
        ),
        (
            "search_debounce_ms",
            saved(&stored.search_debounce_ms),
            effective.search_debounce.as_millis().to_string(),
        ),
        (
            "request_timeout_secs",
            saved(&stored.request_timeout_secs),
            effective
                .request_timeout
                .map_or_else(|| "none".to_string(), |timeout| timeout.as_secs().to_string()),
        ),
        (
            "log_level",
            saved(&stored.log_level),
            effective.log_level.clone().unwrap_or_else(|| "warn".to_string()),
        ),
    ];
    for (key, saved, in_effect) in rows {
        println!("  {key:<22} saved: {saved:<28} in effect: {in_effect}");
    }
    Ok(())
}

/// Prompts for one stored setting and parses the answer into its type.
fn ask<T>(label: &str, slot: &mut Option<T>) -> AppResult<()>
where
    T: FromStr + Display,
{
    let current = slot.as_ref().map(ToString::to_string);
    match prompt(label, current.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *slot = None,
        PromptAction::Set(answer) => {
            let value = answer.parse::<T>().map_err(|_| {
                AppError::Configuration(format!("'{answer}' is not valid for {label}"))
            })?;
            *slot = Some(value);
        }
    }
    Ok(())
}

fn saved<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(value) if !value.to_string().is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_unsaved_settings() {
        assert_eq!(saved::<String>(&None), "-");
        assert_eq!(saved(&Some(String::new())), "-");
        assert_eq!(saved(&Some(250_u64)), "250");
    }
}
