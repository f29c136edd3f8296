//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the StoryApi port
//! - In-memory demo service for demo mode and tests

pub mod demo;
pub mod http;

#[cfg(test)]
pub mod mock_server;
