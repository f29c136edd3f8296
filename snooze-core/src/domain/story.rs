//! Story domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::result::{Error, Result};

/// A single posted link
///
/// Built from the server record as-is; nothing is validated on the way in,
/// so a malformed `url` only surfaces when [`Story::hostname`] is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Opaque server-assigned identifier
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    /// Username of the account that posted the story
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    pub fn new(
        story_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            story_id: story_id.into(),
            title: title.into(),
            author: author.into(),
            url: url.into(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }

    /// Host portion of the story URL
    ///
    /// URLs without a host (`mailto:` and friends) give an empty string.
    pub fn hostname(&self) -> Result<String> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| Error::validation(format!("invalid story url '{}': {}", self.url, e)))?;
        Ok(parsed.host_str().unwrap_or_default().to_string())
    }
}

/// Fields submitted when posting a new story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStory {
    pub title: String,
    pub author: String,
    pub url: String,
}

impl NewStory {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }

    /// Validate submission fields before they go over the wire
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("story title cannot be empty"));
        }
        if self.author.trim().is_empty() {
            return Err(Error::validation("story author cannot be empty"));
        }
        Url::parse(self.url.trim())
            .map_err(|e| Error::validation(format!("invalid story url '{}': {}", self.url, e)))?;
        Ok(())
    }
}
