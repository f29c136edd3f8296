//! Favorite commands - mark, unmark and list favorite stories

use anyhow::Result;
use snooze_core::{SnoozeContext, Story, User};

use super::{fetch_stories, get_context, require_user};
use crate::output;

/// Look a story up in the feed, falling back to the user's own caches
fn find_story(ctx: &SnoozeContext, user: &User, story_id: &str) -> Result<Story> {
    let stories = fetch_stories(ctx, true)?;
    stories
        .find_story(story_id)
        .or_else(|| user.favorites.iter().find(|s| s.story_id == story_id))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Story '{}' not found", story_id))
}

pub fn run_favorite(story_id: &str) -> Result<()> {
    let ctx = get_context()?;
    let mut user = require_user(&ctx)?;
    let story = find_story(&ctx, &user, story_id)?;

    if user.is_favorite(story_id) {
        output::info(&format!("'{}' is already a favorite", story.title));
        return Ok(());
    }

    ctx.user_service.add_favorite(&mut user, &story)?;
    output::success(&format!("Added '{}' to favorites", story.title));
    Ok(())
}

pub fn run_unfavorite(story_id: &str) -> Result<()> {
    let ctx = get_context()?;
    let mut user = require_user(&ctx)?;
    let story = find_story(&ctx, &user, story_id)?;

    if !user.is_favorite(story_id) {
        output::warning(&format!("'{}' is not a favorite", story.title));
        return Ok(());
    }

    ctx.user_service.remove_favorite(&mut user, &story)?;
    output::success(&format!("Removed '{}' from favorites", story.title));
    Ok(())
}

/// List the logged-in user's favorites
pub fn run_list(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user.favorites)?);
        return Ok(());
    }

    if user.favorites.is_empty() {
        println!("No favorites yet. Add one with 'snz favorite <id>'.");
        return Ok(());
    }

    println!("{}", output::story_table(&user.favorites, Some(&user)));
    Ok(())
}
