//! Snooze Core - client data layer for the Hack or Snooze story sharing API
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (Story, StoryList, User) and their local caches
//! - **ports**: Trait definitions for external dependencies (StoryApi)
//! - **services**: Operations that call the API and update the caches
//! - **adapters**: Concrete implementations (HTTP client, in-memory demo)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

mod log_migrations;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::demo::DemoStoryApi;
use adapters::http::HttpStoryApi;
use config::Config;
use ports::StoryApi;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{NewStory, Story, StoryList, User};
pub use services::{EntryPoint, LogEntry, LogEvent, LogFilter, LoggingService};

/// Main context for Snooze operations
///
/// Holds the configuration, the API adapter and the services built on it.
pub struct SnoozeContext {
    pub config: Config,
    pub api: Arc<dyn StoryApi>,
    pub story_service: StoryService,
    pub user_service: UserService,
}

impl SnoozeContext {
    /// Create a context from the settings in `snooze_dir`
    ///
    /// Demo mode swaps the HTTP adapter for a freshly seeded in-memory one.
    pub fn new(snooze_dir: &Path, logger: Option<Arc<LoggingService>>) -> Result<Self> {
        let config = Config::load(snooze_dir)?;

        let api: Arc<dyn StoryApi> = if config.demo_mode {
            Arc::new(DemoStoryApi::seeded())
        } else {
            Arc::new(HttpStoryApi::new_with_base_url(&config.base_url)?)
        };

        Ok(Self::with_api(config, api, logger))
    }

    /// Create a context around an existing API adapter
    pub fn with_api(
        config: Config,
        api: Arc<dyn StoryApi>,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        let story_service = StoryService::new(Arc::clone(&api)).with_logger(logger.clone());
        let user_service = UserService::new(Arc::clone(&api)).with_logger(logger);

        Self {
            config,
            api,
            story_service,
            user_service,
        }
    }

    /// Restore the user from the stored session, if there is one and it is still valid
    pub fn current_user(&self) -> Option<User> {
        let session = self.config.session.as_ref()?;
        self.user_service
            .login_via_stored_credentials(&session.token, &session.username)
    }
}
