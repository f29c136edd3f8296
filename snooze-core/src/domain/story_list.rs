//! Story list domain model

use serde::{Deserialize, Serialize};

use super::story::Story;

/// Every story known to the client, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryList {
    pub stories: Vec<Story>,
}

impl StoryList {
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    /// First story whose id matches, if any
    pub fn find_story(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.story_id == story_id)
    }

    /// Append a story at the end
    pub fn push(&mut self, story: Story) {
        self.stories.push(story);
    }

    /// Remove a story by id, returning it
    pub fn remove(&mut self, story_id: &str) -> Option<Story> {
        let idx = self.stories.iter().position(|s| s.story_id == story_id)?;
        Some(self.stories.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Story> {
        self.stories.iter()
    }
}
