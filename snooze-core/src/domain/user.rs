//! User domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::story::Story;

/// User record as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<Story>,
    /// Stories posted by this user
    #[serde(default)]
    pub stories: Vec<Story>,
}

/// Body of a successful signup or login
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserRecord,
    pub token: String,
}

/// The current authenticated user
///
/// `favorites` and `own_stories` are local caches of server-side relations.
/// Neither ever holds two stories with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub favorites: Vec<Story>,
    pub own_stories: Vec<Story>,
    #[serde(skip_serializing, default)]
    pub login_token: String,
}

impl User {
    pub fn from_record(record: UserRecord, token: impl Into<String>) -> Self {
        let mut user = Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            favorites: Vec::with_capacity(record.favorites.len()),
            own_stories: Vec::with_capacity(record.stories.len()),
            login_token: token.into(),
        };
        for story in record.favorites {
            push_unique(&mut user.favorites, story);
        }
        for story in record.stories {
            push_unique(&mut user.own_stories, story);
        }
        user
    }

    /// Record a story this user just posted (local cache only)
    pub fn add_my_story(&mut self, story: Story) {
        push_unique(&mut self.own_stories, story);
    }

    /// Forget a story this user deleted (local cache only)
    ///
    /// Also drops it from favorites, since a deleted story cannot stay
    /// favorited on the server.
    pub fn remove_my_story(&mut self, story_id: &str) {
        self.own_stories.retain(|s| s.story_id != story_id);
        self.favorites.retain(|s| s.story_id != story_id);
    }

    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.favorites.iter().any(|s| s.story_id == story_id)
    }

    pub fn is_own_story(&self, story_id: &str) -> bool {
        self.own_stories.iter().any(|s| s.story_id == story_id)
    }

    /// Add to the favorites cache; false if it was already there
    pub(crate) fn cache_favorite(&mut self, story: &Story) -> bool {
        push_unique(&mut self.favorites, story.clone())
    }

    /// Drop from the favorites cache, returning the position it held
    pub(crate) fn uncache_favorite(&mut self, story_id: &str) -> Option<(usize, Story)> {
        let idx = self.favorites.iter().position(|s| s.story_id == story_id)?;
        Some((idx, self.favorites.remove(idx)))
    }

    /// Put a favorite back where it was, used when a removal is rolled back
    pub(crate) fn restore_favorite(&mut self, idx: usize, story: Story) {
        let idx = idx.min(self.favorites.len());
        self.favorites.insert(idx, story);
    }
}

fn push_unique(stories: &mut Vec<Story>, story: Story) -> bool {
    if stories.iter().any(|s| s.story_id == story.story_id) {
        return false;
    }
    stories.push(story);
    true
}
