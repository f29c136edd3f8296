//! Integration tests for snooze-core services
//!
//! These walk the same flows the UI drives: load stories, log in, submit,
//! favorite, delete. Network IO is mocked at the trait level with the
//! in-memory demo API.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use tempfile::TempDir;

use snooze_core::adapters::demo::{DemoStoryApi, DEMO_PASSWORD, DEMO_USERNAME};
use snooze_core::config::Config;
use snooze_core::ports::StoryApi;
use snooze_core::{EntryPoint, Error, LoggingService, NewStory, SnoozeContext};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_context() -> (Arc<DemoStoryApi>, SnoozeContext) {
    let api = Arc::new(DemoStoryApi::seeded());
    let ctx = SnoozeContext::with_api(Config::default(), api.clone(), None);
    (api, ctx)
}

fn create_logged_context(temp_dir: &TempDir) -> (Arc<LoggingService>, SnoozeContext) {
    let logger = Arc::new(
        LoggingService::new(temp_dir.path(), EntryPoint::Library, "test")
            .expect("Failed to create logging service"),
    );
    let api = Arc::new(DemoStoryApi::seeded());
    let ctx = SnoozeContext::with_api(Config::default(), api, Some(logger.clone()));
    (logger, ctx)
}

// ============================================================================
// Story flows
// ============================================================================

#[test]
fn test_submit_story_flow() {
    let (api, ctx) = create_context();
    let mut stories = ctx.story_service.get_stories().unwrap();
    let mut user = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
    let before = stories.len();

    let story = ctx
        .story_service
        .add_story(
            &mut stories,
            &user,
            NewStory::new("Rust ownership explained", "Ann", "https://doc.rust-lang.org/book/"),
        )
        .unwrap();
    user.add_my_story(story.clone());

    assert_eq!(stories.len(), before + 1);
    assert_eq!(stories.find_story(&story.story_id), Some(&story));
    assert!(user.is_own_story(&story.story_id));
    assert_eq!(story.hostname().unwrap(), "doc.rust-lang.org");

    // Server agrees with the local caches
    let record = api.get_user(&user.login_token, DEMO_USERNAME).unwrap();
    assert!(record.stories.iter().any(|s| s.story_id == story.story_id));
}

/// Deleting a story prunes it from the story list and from both user caches.
#[test]
fn test_remove_story_prunes_every_cache() {
    let (_, ctx) = create_context();
    let mut stories = ctx.story_service.get_stories().unwrap();
    let mut user = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();

    let own = user.own_stories[0].clone();
    ctx.user_service.add_favorite(&mut user, &own).unwrap();

    ctx.story_service
        .remove_story(&mut stories, &user, &own.story_id)
        .unwrap();
    user.remove_my_story(&own.story_id);

    assert!(stories.find_story(&own.story_id).is_none());
    assert!(!user.is_own_story(&own.story_id));
    assert!(!user.is_favorite(&own.story_id));

    let refreshed = ctx.story_service.get_stories().unwrap();
    assert_eq!(refreshed, stories);
}

#[test]
fn test_find_story_returns_exact_match() {
    let (_, ctx) = create_context();
    let stories = ctx.story_service.get_stories().unwrap();

    for story in stories.iter() {
        assert_eq!(stories.find_story(&story.story_id), Some(story));
    }
    assert!(stories.find_story("unknown-id").is_none());
}

#[test]
fn test_add_story_requires_valid_session() {
    let (_, ctx) = create_context();
    let mut stories = ctx.story_service.get_stories().unwrap();
    let mut user = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
    user.login_token = "revoked".to_string();
    let before = stories.clone();

    let err = ctx
        .story_service
        .add_story(&mut stories, &user, NewStory::new("T", "A", "https://a.example"))
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized(_)));
    assert_eq!(stories, before);
}

// ============================================================================
// Session and favorites
// ============================================================================

#[test]
fn test_session_restore_from_config() {
    let (_, ctx) = create_context();
    let user = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();

    let mut config = Config::default();
    config.store_session(&user.username, &user.login_token);
    let restored_ctx = SnoozeContext::with_api(config, ctx.api.clone(), None);

    let restored = restored_ctx.current_user().unwrap();
    assert_eq!(restored.username, DEMO_USERNAME);
    assert_eq!(restored.own_stories, user.own_stories);
}

#[test]
fn test_session_restore_with_stale_token_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let (logger, ctx) = create_logged_context(&temp_dir);

    let mut config = Config::default();
    config.store_session(DEMO_USERNAME, "stale-token");
    let ctx = SnoozeContext::with_api(config, ctx.api.clone(), Some(logger.clone()));

    assert!(ctx.current_user().is_none());
    assert_eq!(logger.get_errors(10).unwrap().len(), 1);
}

#[test]
fn test_no_session_is_none() {
    let (_, ctx) = create_context();
    assert!(ctx.current_user().is_none());
}

#[test]
fn test_favorites_survive_relogin() {
    let (_, ctx) = create_context();
    let stories = ctx.story_service.get_stories().unwrap();
    let mut user = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();

    let target = stories.iter().nth(3).unwrap().clone();
    ctx.user_service.add_favorite(&mut user, &target).unwrap();

    let again = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
    assert!(again.is_favorite(&target.story_id));
    assert_eq!(again.favorites.len(), user.favorites.len());

    ctx.user_service.remove_favorite(&mut user, &target).unwrap();
    let again = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
    assert!(!again.is_favorite(&target.story_id));
}

#[test]
fn test_signup_then_login() {
    let (_, ctx) = create_context();
    let created = ctx
        .user_service
        .signup("fresh", "hunter2", "Fresh Face")
        .unwrap();
    let logged_in = ctx.user_service.login("fresh", "hunter2").unwrap();

    assert_eq!(created.username, logged_in.username);
    assert_eq!(created.name, "Fresh Face");
    assert_eq!(created.login_token, logged_in.login_token);
}

#[test]
fn test_operations_are_logged_without_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let (logger, ctx) = create_logged_context(&temp_dir);

    let mut stories = ctx.story_service.get_stories().unwrap();
    let user = ctx.user_service.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
    ctx.story_service
        .add_story(&mut stories, &user, NewStory::new("T", "A", "https://a.example"))
        .unwrap();

    let entries = logger.get_recent(10).unwrap();
    let events: Vec<&str> = entries.iter().map(|e| e.event.as_str()).collect();
    assert!(events.contains(&"login"));
    assert!(events.contains(&"story_added"));

    let dump = serde_json::to_string(&entries).unwrap();
    assert!(!dump.contains(&user.login_token));
}
