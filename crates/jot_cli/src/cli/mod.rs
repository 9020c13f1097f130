use clap::{Parser, Subcommand};
use jot_core::config::ConfigOverrides;
use jot_core::error::AppError;
use jot_core::model::Filter;

/// Arguments accepted by the `jot` binary itself. Everything else is typed
/// inside the session.
#[derive(Parser, Debug)]
#[command(name = "jot", author, version, about, long_about = None)]
pub struct SessionArgs {
    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE")]
    pub config_override: Vec<String>,
}

/// Grammar for a single session command line.
#[derive(Parser, Debug)]
#[command(name = "jot", about = "In-memory to-do session", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: add "Buy milk"
    Add {
        text: Option<String>,
    },
    /// Flip a task's completion flag
    ///
    /// Example: toggle 1
    Toggle {
        id: u64,
    },
    /// Delete a task
    ///
    /// Example: delete 1
    Delete {
        id: u64,
    },
    /// Edit a task's text
    ///
    /// With no replacement text, the current text is shown and the next
    /// input line becomes the replacement; an empty line keeps the original.
    ///
    /// Example: edit 1 "Buy organic milk"
    /// Example: edit 1
    Edit {
        id: u64,
        text: Option<String>,
    },
    /// Switch which tasks are displayed
    ///
    /// Example: filter pending
    Filter {
        #[command(subcommand)]
        filter: FilterCommand,
    },
    /// Redraw the task list
    ///
    /// Example: list
    /// Example: list --json
    List,
    /// Show the session counters
    ///
    /// Example: stats
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum FilterCommand {
    /// Show every task
    All,
    /// Show only completed tasks
    Completed,
    /// Show only pending tasks
    Pending,
}

impl From<FilterCommand> for Filter {
    fn from(command: FilterCommand) -> Self {
        match command {
            FilterCommand::All => Filter::All,
            FilterCommand::Completed => Filter::Completed,
            FilterCommand::Pending => Filter::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field =
        canonicalize_flag_name(field).ok_or_else(|| "override key cannot be empty".to_string())?;

    match canonical_field.as_str() {
        "theme" => {
            if remainder.is_some() {
                Err("theme override cannot have subfields".to_string())
            } else {
                Ok(ParsedConfigOverride {
                    target: ConfigOverrideTarget::Theme,
                    value,
                })
            }
        }
        "aliases" | "alias" => {
            let alias_name = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "aliases override requires an alias name".to_string())?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(alias_name.to_string()),
                value,
            })
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

/// Fold the raw `--config-override` values into a single overrides struct.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }

    Ok(overrides)
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
