//! Story API port - remote REST service abstraction

use crate::domain::result::Result;
use crate::domain::{AuthResponse, NewStory, Story, UserRecord};

/// Hack or Snooze API abstraction
///
/// One method per remote endpoint. Implementations do no caching; the
/// services keep `StoryList` and `User` in sync with what these return.
pub trait StoryApi: Send + Sync {
    /// Adapter name (e.g., "http", "demo")
    fn name(&self) -> &str;

    // === Stories ===

    /// `GET /stories` (no auth)
    fn get_stories(&self) -> Result<Vec<Story>>;

    /// `POST /stories`, returns the story as stored by the server
    fn create_story(&self, token: &str, story: &NewStory) -> Result<Story>;

    /// `DELETE /stories/{id}`
    fn delete_story(&self, token: &str, story_id: &str) -> Result<()>;

    // === Accounts ===

    /// `POST /signup`
    fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse>;

    /// `POST /login`
    fn login(&self, username: &str, password: &str) -> Result<AuthResponse>;

    /// `GET /users/{username}?token=`
    fn get_user(&self, token: &str, username: &str) -> Result<UserRecord>;

    // === Favorites ===

    /// `POST /users/{username}/favorites/{storyId}?token=`
    fn add_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()>;

    /// `DELETE /users/{username}/favorites/{storyId}?token=`
    fn remove_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()>;
}
