//! Story service - fetch, submit and delete stories

use std::sync::Arc;

use super::{record, LogEvent, LoggingService};
use crate::domain::result::Result;
use crate::domain::{NewStory, Story, StoryList, User};
use crate::ports::StoryApi;

/// Story service wrapping the stories resource
pub struct StoryService {
    api: Arc<dyn StoryApi>,
    logger: Option<Arc<LoggingService>>,
}

impl StoryService {
    pub fn new(api: Arc<dyn StoryApi>) -> Self {
        Self { api, logger: None }
    }

    pub fn with_logger(mut self, logger: Option<Arc<LoggingService>>) -> Self {
        self.logger = logger;
        self
    }

    /// Fetch every story from the server into a fresh list (no auth)
    pub fn get_stories(&self) -> Result<StoryList> {
        let stories = self.api.get_stories()?;
        Ok(StoryList::new(stories))
    }

    /// Post a story as `user` and append the server's copy to `list`
    ///
    /// The user's own-story cache is left alone; call
    /// [`User::add_my_story`] with the returned story.
    pub fn add_story(&self, list: &mut StoryList, user: &User, new_story: NewStory) -> Result<Story> {
        new_story.validate()?;

        let story = self.api.create_story(&user.login_token, &new_story)?;
        list.push(story.clone());

        record(
            &self.logger,
            LogEvent::new("story_added")
                .with_endpoint("POST /stories")
                .with_story(&story.story_id),
        );
        Ok(story)
    }

    /// Delete a story on the server, then drop it from `list`
    ///
    /// The user's caches are left alone; call [`User::remove_my_story`].
    pub fn remove_story(&self, list: &mut StoryList, user: &User, story_id: &str) -> Result<()> {
        self.api.delete_story(&user.login_token, story_id)?;
        list.remove(story_id);

        record(
            &self.logger,
            LogEvent::new("story_removed")
                .with_endpoint("DELETE /stories/{storyId}")
                .with_story(story_id),
        );
        Ok(())
    }
}
