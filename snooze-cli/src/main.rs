//! Snooze CLI - Hack or Snooze in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snooze_core::LogEvent;

mod commands;
mod output;

use commands::{account, demo, favorites, get_logger, log_event, logs, stories};

/// Snooze - share, favorite and read stories from Hack or Snooze
#[derive(Parser)]
#[command(name = "snz", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all stories, newest first
    Stories {
        /// Show at most this many stories
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a new story
    Submit {
        /// Story title
        #[arg(long)]
        title: Option<String>,
        /// Who wrote the linked piece
        #[arg(long)]
        author: Option<String>,
        /// Link to the story
        #[arg(long)]
        url: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one of your stories
    Delete {
        /// Story ID
        story_id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Add a story to your favorites
    Favorite {
        /// Story ID
        story_id: String,
    },

    /// Remove a story from your favorites
    Unfavorite {
        /// Story ID
        story_id: String,
    },

    /// List your favorite stories
    Favorites {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the stories you posted
    Mine {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account and log in
    Signup {
        #[arg(short, long)]
        username: Option<String>,
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the saved session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Stories { .. } => "stories",
            Commands::Submit { .. } => "submit",
            Commands::Delete { .. } => "delete",
            Commands::Favorite { .. } => "favorite",
            Commands::Unfavorite { .. } => "unfavorite",
            Commands::Favorites { .. } => "favorites",
            Commands::Mine { .. } => "mine",
            Commands::Signup { .. } => "signup",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Demo { .. } => "demo",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.name();

    // Each logger holds its own database connection; keep them short-lived
    log_event(&get_logger(), LogEvent::new("command_executed").with_command(command));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_event(
                &get_logger(),
                LogEvent::new("command_failed")
                    .with_command(command)
                    .with_error(e.to_string())
                    .with_error_details(format!("{:#}", e)),
            );
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Stories { limit, json } => stories::run_list(limit, json),
        Commands::Submit { title, author, url, json } => stories::run_submit(title, author, url, json),
        Commands::Delete { story_id, force } => stories::run_delete(&story_id, force),
        Commands::Favorite { story_id } => favorites::run_favorite(&story_id),
        Commands::Unfavorite { story_id } => favorites::run_unfavorite(&story_id),
        Commands::Favorites { json } => favorites::run_list(json),
        Commands::Mine { json } => stories::run_mine(json),
        Commands::Signup { username, name, password } => account::run_signup(username, name, password),
        Commands::Login { username, password } => account::run_login(username, password),
        Commands::Logout => account::run_logout(),
        Commands::Whoami { json } => account::run_whoami(json),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
