//! In-memory story API for demo mode and tests
//!
//! Behaves like the real service for the operations the client uses:
//! - tokens are checked on every authenticated call
//! - only the poster may delete a story
//! - deleting a story also drops it from everyone's favorites
//!
//! State lives for the lifetime of the value; nothing is persisted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{AuthResponse, NewStory, Story, UserRecord};
use crate::ports::StoryApi;

/// Username of the seeded demo account
pub const DEMO_USERNAME: &str = "demo";
/// Password of the seeded demo account
pub const DEMO_PASSWORD: &str = "demo";
/// Token of the seeded demo account, stable across runs
pub const DEMO_TOKEN: &str = "demo-token";

#[derive(Debug, Clone)]
struct Account {
    password: String,
    name: String,
    created_at: DateTime<Utc>,
    favorites: Vec<String>,
}

#[derive(Debug, Default)]
struct DemoState {
    /// Newest first, matching the API's ordering
    stories: Vec<Story>,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
}

impl DemoState {
    fn username_for(&self, token: &str) -> Result<String> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| Error::unauthorized("Invalid token"))
    }

    fn authorize(&self, token: &str, username: &str) -> Result<()> {
        if self.username_for(token)? != username {
            return Err(Error::unauthorized(
                "You are not authorized to access this user",
            ));
        }
        Ok(())
    }

    /// Each account keeps a single token; logging in again hands it back
    fn issue_token(&mut self, username: &str) -> String {
        if let Some(existing) = self
            .tokens
            .iter()
            .find(|(_, owner)| owner.as_str() == username)
            .map(|(token, _)| token.clone())
        {
            return existing;
        }
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), username.to_string());
        token
    }

    fn record(&self, username: &str) -> Result<UserRecord> {
        let account = self
            .accounts
            .get(username)
            .ok_or_else(|| Error::not_found(format!("No user with username '{}'", username)))?;

        let favorites = account
            .favorites
            .iter()
            .filter_map(|id| self.stories.iter().find(|s| &s.story_id == id))
            .cloned()
            .collect();
        let stories = self
            .stories
            .iter()
            .filter(|s| s.username == username)
            .cloned()
            .collect();

        Ok(UserRecord {
            username: username.to_string(),
            name: account.name.clone(),
            created_at: account.created_at,
            favorites,
            stories,
        })
    }
}

/// In-memory implementation of [`StoryApi`]
#[derive(Debug, Default)]
pub struct DemoStoryApi {
    state: Mutex<DemoState>,
}

impl DemoStoryApi {
    /// Empty service with no stories and no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Service seeded with sample stories and the demo account
    pub fn seeded() -> Self {
        let api = Self::new();
        {
            let mut state = api.state.lock().unwrap_or_else(|e| e.into_inner());
            state.accounts.insert(
                DEMO_USERNAME.to_string(),
                Account {
                    password: DEMO_PASSWORD.to_string(),
                    name: "Demo User".to_string(),
                    created_at: Utc::now() - Duration::days(30),
                    favorites: Vec::new(),
                },
            );
            state
                .tokens
                .insert(DEMO_TOKEN.to_string(), DEMO_USERNAME.to_string());
            state.stories = generate_demo_stories();
            if let Some(first) = state.stories.first().map(|s| s.story_id.clone()) {
                if let Some(account) = state.accounts.get_mut(DEMO_USERNAME) {
                    account.favorites.push(first);
                }
            }
        }
        api
    }

    fn state(&self) -> Result<MutexGuard<'_, DemoState>> {
        self.state
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))
    }
}

impl StoryApi for DemoStoryApi {
    fn name(&self) -> &str {
        "demo"
    }

    fn get_stories(&self) -> Result<Vec<Story>> {
        Ok(self.state()?.stories.clone())
    }

    fn create_story(&self, token: &str, story: &NewStory) -> Result<Story> {
        let mut state = self.state()?;
        let username = state.username_for(token)?;

        let created = Story::new(
            Uuid::new_v4().to_string(),
            story.title.clone(),
            story.author.clone(),
            story.url.clone(),
            username,
        );
        state.stories.insert(0, created.clone());
        Ok(created)
    }

    fn delete_story(&self, token: &str, story_id: &str) -> Result<()> {
        let mut state = self.state()?;
        let username = state.username_for(token)?;

        let idx = state
            .stories
            .iter()
            .position(|s| s.story_id == story_id)
            .ok_or_else(|| Error::not_found(format!("No story with id '{}'", story_id)))?;
        if state.stories[idx].username != username {
            return Err(Error::unauthorized("Only the poster may delete a story"));
        }

        state.stories.remove(idx);
        for account in state.accounts.values_mut() {
            account.favorites.retain(|id| id != story_id);
        }
        Ok(())
    }

    fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("username and password are required"));
        }

        let mut state = self.state()?;
        if state.accounts.contains_key(username) {
            return Err(Error::Conflict(format!(
                "There is already a user with username '{}'",
                username
            )));
        }

        state.accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                name: name.to_string(),
                created_at: Utc::now(),
                favorites: Vec::new(),
            },
        );
        let token = state.issue_token(username);
        let user = state.record(username)?;
        Ok(AuthResponse { user, token })
    }

    fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let mut state = self.state()?;
        match state.accounts.get(username) {
            None => {
                return Err(Error::not_found(format!(
                    "No user with username '{}'",
                    username
                )))
            }
            Some(account) if account.password != password => {
                return Err(Error::unauthorized("Invalid password"))
            }
            Some(_) => {}
        }

        let token = state.issue_token(username);
        let user = state.record(username)?;
        Ok(AuthResponse { user, token })
    }

    fn get_user(&self, token: &str, username: &str) -> Result<UserRecord> {
        let state = self.state()?;
        state.authorize(token, username)?;
        state.record(username)
    }

    fn add_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let mut state = self.state()?;
        state.authorize(token, username)?;

        if !state.stories.iter().any(|s| s.story_id == story_id) {
            return Err(Error::not_found(format!("No story with id '{}'", story_id)));
        }
        if let Some(account) = state.accounts.get_mut(username) {
            if !account.favorites.iter().any(|id| id == story_id) {
                account.favorites.push(story_id.to_string());
            }
        }
        Ok(())
    }

    fn remove_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let mut state = self.state()?;
        state.authorize(token, username)?;

        if let Some(account) = state.accounts.get_mut(username) {
            account.favorites.retain(|id| id != story_id);
        }
        Ok(())
    }
}

/// Generate the demo story feed, newest first
pub fn generate_demo_stories() -> Vec<Story> {
    let now = Utc::now();
    let seed = [
        (
            "11111111-1111-1111-1111-111111111111",
            "Rust 2024 edition is out",
            "The Rust Team",
            "https://blog.rust-lang.org/2025/02/20/Rust-1.85.0.html",
            "ferris",
        ),
        (
            "22222222-2222-2222-2222-222222222222",
            "How the DOM really works",
            "Jane Doe",
            "https://developer.mozilla.org/en-US/docs/Web/API/Document_Object_Model",
            "janed",
        ),
        (
            "33333333-3333-3333-3333-333333333333",
            "A gentle guide to HTTP status codes",
            "Sam Rivera",
            "https://httpstatuses.io/",
            DEMO_USERNAME,
        ),
        (
            "44444444-4444-4444-4444-444444444444",
            "Why you should write your own link aggregator",
            "Alex Kim",
            "https://news.ycombinator.com/item?id=1",
            "akim",
        ),
    ];

    seed.iter()
        .enumerate()
        .map(|(i, (id, title, author, url, username))| {
            let mut story = Story::new(*id, *title, *author, *url, *username);
            story.created_at = now - Duration::hours(i as i64 * 6);
            story
        })
        .collect()
}
