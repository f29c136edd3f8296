//! CLI command implementations

pub mod account;
pub mod demo;
pub mod favorites;
pub mod logs;
pub mod stories;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use snooze_core::{EntryPoint, LogEvent, LoggingService, SnoozeContext, StoryList, User};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let snooze_dir = get_snooze_dir().ok()?;
    std::fs::create_dir_all(&snooze_dir).ok()?;
    LoggingService::new(&snooze_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<Arc<LoggingService>>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the snooze directory from `SNOOZE_DIR` or default to ~/.snooze
pub fn get_snooze_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SNOOZE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".snooze"))
        .context("Could not find home directory; set SNOOZE_DIR")
}

/// Get or create snooze context
pub fn get_context() -> Result<SnoozeContext> {
    let snooze_dir = get_snooze_dir()?;

    std::fs::create_dir_all(&snooze_dir)
        .with_context(|| format!("Failed to create snooze directory: {:?}", snooze_dir))?;

    SnoozeContext::new(&snooze_dir, get_logger()).context("Failed to initialize snooze context")
}

/// Restore the logged-in user or explain how to log in
pub fn require_user(ctx: &SnoozeContext) -> Result<User> {
    match ctx.current_user() {
        Some(user) => Ok(user),
        None if ctx.config.session.is_some() => {
            anyhow::bail!("Your saved session is no longer valid. Run 'snz login' again.")
        }
        None => anyhow::bail!("You are not logged in. Run 'snz login' or 'snz signup' first."),
    }
}

/// Fetch the story feed behind a spinner
pub fn fetch_stories(ctx: &SnoozeContext, show_spinner: bool) -> Result<StoryList> {
    if !show_spinner {
        return Ok(ctx.story_service.get_stories()?);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Fetching stories from {}", ctx.api.name()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = ctx.story_service.get_stories();
    spinner.finish_and_clear();
    Ok(result?)
}
