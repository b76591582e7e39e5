use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_NAMED_FILES, StoredConfig, config_file_path};
use crate::error::{AppError, AppResult};
use crate::services::ChangeSource;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring gitmsg.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt("Change source (staged/status)", &mut cfg.source)?;
    if let Some(source) = &cfg.source {
        if ChangeSource::from_str(source).is_none() {
            return Err(AppError::Configuration(format!(
                "unknown change source '{source}' (expected staged or status)"
            )));
        }
    }

    let mut max_named = cfg.max_named_files.map(|value| value.to_string());
    apply_prompt("Most files to name before counting", &mut max_named)?;
    cfg.max_named_files = max_named
        .map(|value| {
            value.parse::<usize>().map_err(|_| {
                AppError::Configuration(format!("expected a number of files, got '{value}'"))
            })
        })
        .transpose()?;

    apply_prompt(
        "Log level (error/warn/info/debug/trace)",
        &mut cfg.log_level,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Change source: {}", display_value(&cfg.source, "staged"));
    println!(
        "Most files to name: {}",
        display_value(
            &cfg.max_named_files.map(|value| value.to_string()),
            &DEFAULT_MAX_NAMED_FILES.to_string()
        )
    );
    println!(
        "Log level: {}",
        display_value(&cfg.log_level, DEFAULT_LOG_LEVEL)
    );

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>) -> AppResult<()> {
    match prompt(field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match current {
        Some(value) => write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::from_input(&input))
}

fn display_value(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("<default: {default}>"))
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
