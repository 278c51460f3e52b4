//! tagfield - a terminal form with tag entry and autocomplete.
//!
//! Builds a form from the command line, binds the tag widget to the chosen
//! fields and prints the submitted values as JSON on Ctrl+S.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::Value;
use tracing::{error, info, warn};

use tagfield::app::App;
use tagfield::config::Config;
use tagfield::events::EventHandler;
use tagfield::ui::{bind_with, init_theme, Form, MatchMode, Theme, WidgetOptions};
use tagfield::{logging, AppError};

/// Candidates used when no file is given.
const DEFAULT_CANDIDATES: &[&str] = &[
    "bug",
    "documentation",
    "enhancement",
    "good first issue",
    "help wanted",
    "performance",
    "question",
    "refactor",
    "security",
    "testing",
];

#[derive(Debug, Parser)]
#[command(name = "tagfield", version, about)]
struct Cli {
    /// JSON file holding an array of candidate strings.
    #[arg(long, value_name = "FILE")]
    candidates: Option<PathBuf>,

    /// Name of a tag field; may be repeated.
    #[arg(long = "field", value_name = "NAME", default_value = "tags")]
    fields: Vec<String>,

    /// Initial value of a field, e.g. `tags=rust,tui`; may be repeated.
    #[arg(long = "value", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    values: Vec<(String, String)>,

    /// Configuration file to use instead of the default one.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Match typed text literally instead of as a pattern.
    #[arg(long)]
    literal: bool,

    /// Maximum number of suggestions shown.
    #[arg(long, value_name = "N")]
    max_items: Option<usize>,

    /// Directory for log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_dir.as_deref()).context("Failed to initialize logging")?;

    let result = run(cli);
    if let Err(e) = &result {
        error!(error = %e, "Exiting with error");
    }
    logging::shutdown();
    result
}

fn run(cli: Cli) -> Result<()> {
    init_theme(Theme::default());

    let mut notices = Vec::new();
    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Using default configuration");
            notices.push(e);
            Config::default()
        }
    };
    if cli.literal {
        config.widget.match_mode = MatchMode::Literal;
    }
    if let Some(max_items) = cli.max_items {
        config.widget.max_items = max_items;
    }

    let candidates = load_candidates(&cli)?;
    let (form, ignored) = build_form(&cli, &candidates, WidgetOptions::from(&config.widget))?;
    notices.extend(ignored);

    let mut app = App::new(form, config);
    for notice in notices {
        if notice.is_critical() {
            return Err(notice.into());
        }
        app.handle_error(&notice);
    }

    install_panic_hook();
    let mut terminal = setup_terminal(app.config().ui.mouse)?;
    let outcome = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    outcome?;

    if let Some(fields) = app.take_submission() {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> std::result::Result<Config, AppError> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn load_candidates(cli: &Cli) -> std::result::Result<Value, AppError> {
    match &cli.candidates {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let value = serde_json::from_str(&raw)?;
            info!(path = %path.display(), "Loaded candidates");
            Ok(value)
        }
        None => Ok(Value::from(DEFAULT_CANDIDATES.to_vec())),
    }
}

/// Field names in command line order, each name once.
fn distinct_fields(cli: &Cli) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::with_capacity(cli.fields.len());
    for name in &cli.fields {
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }
    names
}

/// Build the form and bind every field.
///
/// Values for unknown fields are skipped and returned as notices.
fn build_form(
    cli: &Cli,
    candidates: &Value,
    options: WidgetOptions,
) -> std::result::Result<(Form, Vec<AppError>), AppError> {
    let fields = distinct_fields(cli);
    let mut form = Form::new("tagfield");
    for name in &fields {
        form.add_text(*name);
    }

    let mut notices = Vec::new();
    for (name, value) in &cli.values {
        match form.text_input_position(name) {
            Some(index) => {
                form.set_input_value(index, value.as_str());
            }
            None => {
                warn!(field = %name, "Ignoring value for unknown field");
                notices.push(AppError::other(format!(
                    "No field named '{}'; its --value was ignored.",
                    name
                )));
            }
        }
    }

    for name in &fields {
        bind_with(&mut form, name, candidates, options)?;
    }
    Ok((form, notices))
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));
}

fn setup_terminal(mouse: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    enter_screen(mouse).map_err(|e| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        e
    })
}

fn enter_screen(mouse: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    if mouse {
        execute!(stdout, EnableMouseCapture).context("Failed to enable mouse capture")?;
    }
    let terminal = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| AppError::terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let events = EventHandler::with_tick_rate(app.config().ui.tick_rate_ms);
    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;
        let event = events.next().context("Failed to read terminal event")?;
        app.handle_event(event);
    }
    Ok(())
}
