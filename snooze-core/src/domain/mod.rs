//! Core domain entities
//!
//! Plain data structures with local cache logic only. Nothing here touches
//! the network; services drive the API and then mutate these.

mod story;
mod story_list;
mod user;
pub mod result;

pub use story::{NewStory, Story};
pub use story_list::StoryList;
pub use user::{AuthResponse, User, UserRecord};
