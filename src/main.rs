//! `TaskPilot` - AI assistant for everyday business tasks
//!
//! Entry point for the application.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use taskpilot::app::App;
use taskpilot::catalog::{Catalog, Requirement};
use taskpilot::cli::{Args, Command};
use taskpilot::core::{
    FormTelemetry, GeminiGateway, NoopTelemetry, OneShotRequest, TelemetrySink, run_once,
};
use taskpilot::fs::{AppPaths, Settings};
use taskpilot::logging::{LoggingOptions, init_logging};
use taskpilot::tui::TerminalEventGuard;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut paths = AppPaths::from_system()?;
    if let Some(config) = args.config.clone() {
        paths = paths.with_settings_file(config);
    }

    // Runs before loading so a broken settings file can be replaced
    if let Some(Command::Init { force }) = &args.command {
        let path = paths.write_default_settings(*force)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mut settings = paths.load_settings().with_context(|| {
        format!(
            "failed to load settings from {}",
            paths.settings_file().display()
        )
    })?;
    settings.apply_env();
    if let Some(model) = args
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
    {
        settings.model = model.to_string();
    }

    let log_dir = paths.log_dir();
    init_logging(LoggingOptions {
        log_dir: &log_dir,
        level: settings.log_level.as_deref(),
        stderr: args.command.is_some(),
    })?;
    info!(model = %settings.model, "starting taskpilot");

    match args.command {
        Some(Command::Tasks) => {
            print_tasks(&Catalog::builtin());
            Ok(())
        }
        Some(Command::Run { task, set, attach }) => {
            let request = OneShotRequest {
                task,
                fields: set,
                attachments: attach,
            };
            run_task(&settings, request).await
        }
        // Handled before settings are loaded
        Some(Command::Init { .. }) => Ok(()),
        None => {
            // Initialize the terminal with crossterm backend
            let mut terminal = ratatui::init();
            let result = run_app(&mut terminal, settings, paths);
            ratatui::restore();
            result
        }
    }
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    settings: Settings,
    paths: AppPaths,
) -> Result<()> {
    // Must be created after ratatui::init, which can reset terminal flags.
    let _event_guard = TerminalEventGuard::new();

    let mut app = App::new(settings, paths);

    loop {
        // Layout must be computed from the same area the frame renders into
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Paste(text) => {
                    app.handle_paste(&text);
                }
                _ => {}
            }
        }

        // Apply finished model calls and file reads
        app.process_events();

        if app.should_quit() {
            break;
        }
    }

    info!("exiting");
    Ok(())
}

fn print_tasks(catalog: &Catalog) {
    for (category, tasks) in catalog.grouped() {
        println!("{}", category.name());
        for task in tasks {
            println!("  {:<28} {}", task.key, task.display_name);
            for field in task.fields {
                let marker = match field.requirement {
                    Requirement::Required => "*",
                    Requirement::OneOf(_) => "+",
                    Requirement::When(_) => "?",
                    Requirement::Optional => " ",
                };
                println!(
                    "      {marker} {:<26} {} ({})",
                    field.id,
                    field.label,
                    field.kind.name()
                );
            }
        }
        println!();
    }
    println!("* 必須  + いずれか必須  ? 条件付き");
}

async fn run_task(settings: &Settings, request: OneShotRequest) -> Result<()> {
    if settings.api_key().is_none() {
        bail!("API キーが設定されていません。GEMINI_API_KEY を設定してください。");
    }

    let gateway = GeminiGateway::from_settings(settings);
    let telemetry: Box<dyn TelemetrySink> = match settings.telemetry() {
        Some(config) => Box::new(FormTelemetry::new(config.clone())),
        None => Box::new(NoopTelemetry),
    };

    let result = run_once(
        Arc::new(Catalog::builtin()),
        &gateway,
        telemetry.as_ref(),
        &settings.model,
        request,
    )
    .await?;

    println!("{}", result.reply);
    if !result.suggestions.is_empty() {
        println!();
        println!("提案:");
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            println!("  [{}] {suggestion}", i + 1);
        }
    }
    Ok(())
}
