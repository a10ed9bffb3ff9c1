//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, LinguaConfig};
use crate::tutor::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES, find_language};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the stored settings. Otherwise asks for the default
/// language and model and saves them.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;

    if show {
        print_current_defaults(&manager, &config);
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager, config))
}

fn run_configure_inner(manager: &ConfigManager, mut config: ConfigFile) -> Result<()> {
    print_current_defaults(manager, &config);

    let language = select_language(config.lingua.language.as_deref())?;
    let model = enter_model(config.lingua.model.as_deref())?;

    config.lingua = LinguaConfig {
        language: Some(language),
        model: Some(model),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(manager: &ConfigManager, config: &ConfigFile) {
    let or_unset = |value: Option<&str>| value.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}     {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display())
    );
    println!(
        "  {} {}",
        Style::label("language"),
        or_unset(config.lingua.language.as_deref())
    );
    println!(
        "  {}    {}",
        Style::label("model"),
        or_unset(config.lingua.model.as_deref())
    );
    println!(
        "  {} {}",
        Style::label("endpoint"),
        or_unset(config.provider.endpoint.as_deref())
    );
    println!(
        "  {}  {}",
        Style::label("api key"),
        if config.provider.get_api_key().is_some() {
            Style::secondary("(set)")
        } else {
            Style::warning(format!(
                "(not set, export {})",
                config.provider.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
            ))
        }
    );
    println!();
}

fn select_language(default: Option<&str>) -> Result<String> {
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| format!("{} - {}", lang.name, lang.code))
        .collect();

    let default_name = default
        .and_then(find_language)
        .map_or(DEFAULT_LANGUAGE, |lang| lang.name);
    let default_index = SUPPORTED_LANGUAGES
        .iter()
        .position(|lang| lang.name == default_name)
        .unwrap_or(0);

    let selection = Select::new("Default language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    // Extract the name from "Name - code"
    let name = selection.split(" - ").next().unwrap_or(&selection);
    Ok(name.to_string())
}

fn enter_model(default: Option<&str>) -> Result<String> {
    let model = Text::new("Default model:")
        .with_help_message("Gemini model name")
        .with_default(default.unwrap_or(DEFAULT_MODEL))
        .prompt()?;

    if model.trim().is_empty() {
        bail!("Model name cannot be empty");
    }

    Ok(model.trim().to_string())
}
