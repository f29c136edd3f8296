//! Story commands - list, submit and delete stories

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input};
use snooze_core::NewStory;

use super::{fetch_stories, get_context, require_user};
use crate::output;

/// List the story feed
pub fn run_list(limit: Option<usize>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let stories = fetch_stories(&ctx, !json)?;
    let user = ctx.current_user();

    let shown: Vec<_> = stories.iter().take(limit.unwrap_or(usize::MAX)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No stories yet. Be the first with 'snz submit'.");
        return Ok(());
    }

    println!("{}", output::story_table(shown, user.as_ref()));
    if user.is_none() {
        println!("{}", "Log in to see and manage your favorites.".dimmed());
    }
    Ok(())
}

/// List stories posted by the logged-in user
pub fn run_mine(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user.own_stories)?);
        return Ok(());
    }

    if user.own_stories.is_empty() {
        println!("You haven't posted any stories yet.");
        return Ok(());
    }

    println!("{}", output::story_table(&user.own_stories, Some(&user)));
    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    let v: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(v)
}

/// Submit a new story as the logged-in user
pub fn run_submit(
    title: Option<String>,
    author: Option<String>,
    url: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let mut user = require_user(&ctx)?;
    let mut stories = fetch_stories(&ctx, !json)?;

    let new_story = NewStory::new(
        prompt_if_missing(title, "Title")?,
        prompt_if_missing(author, "Author")?,
        prompt_if_missing(url, "URL")?,
    );

    let story = ctx.story_service.add_story(&mut stories, &user, new_story)?;
    user.add_my_story(story.clone());

    if json {
        println!("{}", serde_json::to_string_pretty(&story)?);
    } else {
        output::success(&format!(
            "Submitted '{}' ({})",
            story.title,
            output::display_host(&story)
        ));
        println!("  ID: {}", story.story_id.dimmed());
    }
    Ok(())
}

/// Delete one of the logged-in user's stories
pub fn run_delete(story_id: &str, force: bool) -> Result<()> {
    let ctx = get_context()?;
    let mut user = require_user(&ctx)?;
    let mut stories = fetch_stories(&ctx, true)?;

    if !user.is_own_story(story_id) {
        anyhow::bail!("Story '{}' is not one of your stories", story_id);
    }

    let title = user
        .own_stories
        .iter()
        .find(|s| s.story_id == story_id)
        .map(|s| s.title.clone())
        .unwrap_or_default();

    if !force {
        println!("\n{}", format!("This will delete '{}'.", title).yellow());
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    ctx.story_service.remove_story(&mut stories, &user, story_id)?;
    user.remove_my_story(story_id);

    output::success(&format!("Deleted '{}'", title));
    Ok(())
}
