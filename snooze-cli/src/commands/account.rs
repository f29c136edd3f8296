//! Account commands - signup, login, logout and whoami

use std::env;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};
use snooze_core::config::Config;
use snooze_core::{SnoozeContext, User};

use super::{get_context, get_snooze_dir};
use crate::output;

/// Get a value from its flag or prompt for it
fn get_or_prompt(flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(v) = flag {
        return Ok(v);
    }
    let v: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(v)
}

/// Get password from --password flag, SNOOZE_PASSWORD env var, or prompt
fn get_password_or_prompt(password_flag: Option<String>, confirm: bool) -> Result<String> {
    if let Some(p) = password_flag {
        return Ok(p);
    }

    if let Ok(p) = env::var("SNOOZE_PASSWORD") {
        return Ok(p);
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Persist the session so later commands start logged in
fn remember(ctx: &SnoozeContext, user: &User) -> Result<()> {
    let snooze_dir = get_snooze_dir()?;
    let mut config = ctx.config.clone();
    config.store_session(&user.username, &user.login_token);
    config.save(&snooze_dir)
}

pub fn run_signup(
    username: Option<String>,
    name: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = get_context()?;
    let username = get_or_prompt(username, "Username")?;
    let name = get_or_prompt(name, "Name")?;
    let password = get_password_or_prompt(password, true)?;

    let user = ctx.user_service.signup(&username, &password, &name)?;
    remember(&ctx, &user)?;

    output::success(&format!("Welcome, {}! Account '{}' created.", user.name, user.username));
    Ok(())
}

pub fn run_login(username: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let username = get_or_prompt(username, "Username")?;
    let password = get_password_or_prompt(password, false)?;

    let user = ctx.user_service.login(&username, &password)?;
    remember(&ctx, &user)?;

    output::success(&format!("Logged in as {}", user.username));
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let snooze_dir = get_snooze_dir()?;
    let mut config = Config::load(&snooze_dir)?;

    if config.session.is_none() {
        output::info("Not logged in");
        return Ok(());
    }

    config.clear_session();
    config.save(&snooze_dir)?;
    output::success("Logged out");
    Ok(())
}

pub fn run_whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx.current_user();

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    match user {
        Some(user) => {
            println!("{} ({})", user.username.bold(), user.name);
            println!(
                "  Member since: {}",
                user.created_at.format("%Y-%m-%d")
            );
            println!("  Stories: {}", user.own_stories.len());
            println!("  Favorites: {}", user.favorites.len());
            if ctx.config.demo_mode {
                println!("  {}", "Demo mode".yellow());
            }
        }
        None if ctx.config.session.is_some() => {
            output::warning("Saved session is no longer valid. Run 'snz login' again.");
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
