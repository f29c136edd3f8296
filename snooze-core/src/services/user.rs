//! User service - accounts, session restore and favorites

use std::sync::Arc;

use super::{record, LogEvent, LoggingService};
use crate::domain::result::Result;
use crate::domain::{Story, User};
use crate::ports::StoryApi;

/// User service for authentication and the favorites relation
pub struct UserService {
    api: Arc<dyn StoryApi>,
    logger: Option<Arc<LoggingService>>,
}

impl UserService {
    pub fn new(api: Arc<dyn StoryApi>) -> Self {
        Self { api, logger: None }
    }

    pub fn with_logger(mut self, logger: Option<Arc<LoggingService>>) -> Self {
        self.logger = logger;
        self
    }

    /// Register a new account and return it logged in
    pub fn signup(&self, username: &str, password: &str, name: &str) -> Result<User> {
        let auth = self.api.signup(username, password, name)?;
        record(&self.logger, LogEvent::new("signup").with_endpoint("POST /signup"));
        Ok(User::from_record(auth.user, auth.token))
    }

    /// Log in with username and password
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let auth = self.api.login(username, password)?;
        record(&self.logger, LogEvent::new("login").with_endpoint("POST /login"));
        Ok(User::from_record(auth.user, auth.token))
    }

    /// Rebuild the user from a saved token and username
    ///
    /// Any failure (network, rejected token, bad response) means "not logged
    /// in" and yields `None`; the cause only goes to the event log.
    pub fn login_via_stored_credentials(&self, token: &str, username: &str) -> Option<User> {
        match self.api.get_user(token, username) {
            Ok(user_record) => Some(User::from_record(user_record, token)),
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("login_via_stored_credentials_failed")
                        .with_endpoint("GET /users/{username}")
                        .with_error(e.to_string()),
                );
                None
            }
        }
    }

    /// Favorite a story: local cache first, then the server
    ///
    /// If the server call fails the cache is put back as it was.
    pub fn add_favorite(&self, user: &mut User, story: &Story) -> Result<()> {
        let added = user.cache_favorite(story);

        if let Err(e) = self
            .api
            .add_favorite(&user.login_token, &user.username, &story.story_id)
        {
            if added {
                user.uncache_favorite(&story.story_id);
            }
            return Err(e);
        }

        record(
            &self.logger,
            LogEvent::new("favorite_added")
                .with_endpoint("POST /users/{username}/favorites/{storyId}")
                .with_story(&story.story_id),
        );
        Ok(())
    }

    /// Unfavorite a story: local cache first, then the server
    ///
    /// If the server call fails the story goes back to its old position.
    pub fn remove_favorite(&self, user: &mut User, story: &Story) -> Result<()> {
        let removed = user.uncache_favorite(&story.story_id);

        if let Err(e) = self
            .api
            .remove_favorite(&user.login_token, &user.username, &story.story_id)
        {
            if let Some((idx, previous)) = removed {
                user.restore_favorite(idx, previous);
            }
            return Err(e);
        }

        record(
            &self.logger,
            LogEvent::new("favorite_removed")
                .with_endpoint("DELETE /users/{username}/favorites/{storyId}")
                .with_story(&story.story_id),
        );
        Ok(())
    }
}
