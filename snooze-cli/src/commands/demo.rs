//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_snooze_dir;
use snooze_core::adapters::demo::{DEMO_PASSWORD, DEMO_TOKEN, DEMO_USERNAME};
use snooze_core::config::Config;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let snooze_dir = get_snooze_dir()?;
    std::fs::create_dir_all(&snooze_dir)?;
    let mut config = Config::load(&snooze_dir)?;

    match command {
        Some(DemoCommands::On) => {
            config.enable_demo_mode();
            config.store_session(DEMO_USERNAME, DEMO_TOKEN);
            config.save(&snooze_dir)?;
            println!("{}", "Demo mode enabled".green());
            println!(
                "Logged in as '{}' (password '{}'). Changes reset on every run.",
                DEMO_USERNAME, DEMO_PASSWORD
            );
            Ok(())
        }
        Some(DemoCommands::Off) => {
            config.disable_demo_mode();
            if config
                .session
                .as_ref()
                .is_some_and(|s| s.token == DEMO_TOKEN)
            {
                config.clear_session();
            }
            config.save(&snooze_dir)?;
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if config.demo_mode {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
            Ok(())
        }
    }
}
