//! Output formatting utilities

use chrono::{DateTime, TimeZone, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use snooze_core::{Story, User};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Host shown next to a story title
///
/// Unparseable URLs show as "?" and host-less ones as "-".
pub fn display_host(story: &Story) -> String {
    match story.hostname() {
        Ok(host) if host.is_empty() => "-".to_string(),
        Ok(host) => host,
        Err(_) => "?".to_string(),
    }
}

/// Short relative age, e.g. "5m", "3h", "2d"
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(created_at);
    if age.num_days() > 0 {
        format!("{}d", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h", age.num_hours())
    } else {
        format!("{}m", age.num_minutes().max(0))
    }
}

/// Local-log timestamp (unix millis) as "YYYY-MM-DD HH:MM:SS"
pub fn format_log_time(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Render stories as a table, starring the user's favorites
pub fn story_table<'a>(stories: impl IntoIterator<Item = &'a Story>, user: Option<&User>) -> Table {
    let now = Utc::now();
    let mut table = create_table();
    table.set_header(vec!["", "Title", "Host", "Author", "Posted by", "Age", "ID"]);

    for story in stories {
        let marker = match user {
            Some(u) if u.is_favorite(&story.story_id) => "★".yellow().to_string(),
            Some(_) => "☆".dimmed().to_string(),
            None => String::new(),
        };
        table.add_row(vec![
            marker,
            story.title.clone(),
            display_host(story),
            story.author.clone(),
            story.username.clone(),
            format_age(story.created_at, now),
            story.story_id.clone(),
        ]);
    }

    table
}
