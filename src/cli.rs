//! CLI argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `TaskPilot` - AI assistant for everyday business tasks
///
/// Pick a task template, fill in its form and refine the answer in a chat.
/// Without a subcommand the interactive terminal UI starts.
#[derive(Parser, Debug)]
#[command(name = "taskpilot", version, about, long_about = None)]
pub struct Args {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model id overriding the configured one (e.g. gemini-2.5-pro)
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Non-interactive subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available tasks by category
    Tasks,
    /// Run one task and print the first reply
    Run {
        /// Task key (see `taskpilot tasks`)
        task: String,
        /// Field value as FIELD=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// File for a file field as FIELD=PATH (repeatable)
        #[arg(short, long = "attach", value_name = "FIELD=PATH", value_parser = parse_attachment)]
        attach: Vec<(String, PathBuf)>,
    },
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

/// Parses `FIELD=VALUE`. The value may contain further `=` and `\n` escapes.
///
/// # Errors
///
/// Returns an error if there is no `=` or the field id is empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing field id in '{raw}'"));
    }
    Ok((id.to_string(), value.replace("\\n", "\n")))
}

fn parse_attachment(raw: &str) -> Result<(String, PathBuf), String> {
    let (id, path) = parse_assignment(raw)?;
    if path.is_empty() {
        return Err(format!("missing path in '{raw}'"));
    }
    Ok((id, PathBuf::from(path)))
}
