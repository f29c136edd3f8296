//! Service layer - business logic orchestration
//!
//! Services call the API port and then bring the local `StoryList` and
//! `User` caches in line with what the server accepted.

pub mod logging;
mod story;
mod user;

use std::sync::Arc;

pub use logging::{EntryPoint, LogEntry, LogEvent, LogFilter, LoggingService};
pub use story::StoryService;
pub use user::UserService;

/// Record an event if a logger is attached; logging never fails an operation
fn record(logger: &Option<Arc<LoggingService>>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}
