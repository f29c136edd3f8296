//! Logs command - inspect the local event log
//!
//! Entries are filtered in the database, so `--story` answers "what happened
//! to this story" and `--command` answers "what did this command touch".

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_snooze_dir;
use crate::output;
use snooze_core::{EntryPoint, LogEntry, LogFilter, LoggingService};

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent events, newest first
    List {
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only failed operations
        #[arg(long)]
        errors: bool,
        /// Only events recorded by this command (e.g. favorite)
        #[arg(long)]
        command: Option<String>,
        /// Only events about this story ID
        #[arg(long)]
        story: Option<String>,
        /// Only this event name (e.g. story_added)
        #[arg(long)]
        event: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete events older than N days
    Clear {
        #[arg(long, default_value = "30")]
        older_than_days: u32,
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Show event totals and where the log lives
    Stats {
        #[arg(long)]
        json: bool,
    },
}

fn open_log() -> Result<LoggingService> {
    let snooze_dir = get_snooze_dir()?;
    std::fs::create_dir_all(&snooze_dir)?;
    LoggingService::new(&snooze_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

pub fn run(command: LogsCommands) -> Result<()> {
    match command {
        LogsCommands::List {
            limit,
            errors,
            command,
            story,
            event,
            json,
        } => {
            let filter = LogFilter {
                limit,
                errors_only: errors,
                command,
                story_id: story,
                event,
            };
            list(&open_log()?, &filter, json)
        }
        LogsCommands::Clear {
            older_than_days,
            force,
        } => clear(&open_log()?, older_than_days, force),
        LogsCommands::Stats { json } => stats(&open_log()?, json),
    }
}

fn list(log: &LoggingService, filter: &LogFilter, json: bool) -> Result<()> {
    let entries = log.search(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        output::info("No matching events.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Command", "Event", "Story", "Error"]);
    for entry in &entries {
        table.add_row(vec![
            output::format_log_time(entry.timestamp),
            entry.command.clone().unwrap_or_default(),
            event_label(entry),
            entry.story_id.clone().unwrap_or_default(),
            entry.error_message.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

/// Event name, with the API endpoint when one was hit
fn event_label(entry: &LogEntry) -> String {
    match &entry.endpoint {
        Some(endpoint) => format!("{} ({})", entry.event, endpoint.dimmed()),
        None => entry.event.clone(),
    }
}

fn clear(log: &LoggingService, older_than_days: u32, force: bool) -> Result<()> {
    let cutoff = Utc::now() - Duration::days(i64::from(older_than_days));

    if !force
        && !Confirm::new()
            .with_prompt(format!("Delete events older than {} days?", older_than_days))
            .default(false)
            .interact()?
    {
        output::info("Cancelled");
        return Ok(());
    }

    let deleted = log.delete_before(cutoff.timestamp_millis())?;
    output::success(&format!("Deleted {} events", deleted));
    Ok(())
}

fn stats(log: &LoggingService, json: bool) -> Result<()> {
    let total = log.count()?;
    let failures = log.count_errors()?;
    let per_event = log.event_counts()?;

    if json {
        let events: serde_json::Map<String, serde_json::Value> = per_event
            .iter()
            .map(|(event, n)| (event.clone(), serde_json::json!(n)))
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "total": total,
                "failures": failures,
                "events": events,
                "path": log.db_path().to_string_lossy(),
            })
        );
        return Ok(());
    }

    println!(
        "{} events, {} failed ({})",
        total.to_string().bold(),
        failures.to_string().red(),
        log.db_path().display()
    );
    if !per_event.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["Event", "Count"]);
        for (event, n) in per_event {
            table.add_row(vec![event, n.to_string()]);
        }
        println!("{}", table);
    }
    Ok(())
}
