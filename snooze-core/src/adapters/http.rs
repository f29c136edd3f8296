//! Hack or Snooze HTTP client
//!
//! Talks to the public Hack or Snooze REST API:
//! - GET/POST /stories, DELETE /stories/{id}
//! - POST /signup, POST /login, GET /users/{username}
//! - POST/DELETE /users/{username}/favorites/{storyId}

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{AuthResponse, NewStory, Story, UserRecord};
use crate::ports::StoryApi;

// =============================================================================
// Wire models
// =============================================================================

#[derive(Debug, Deserialize)]
struct StoriesResponse {
    stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct StoryResponse {
    story: Story,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: UserRecord,
}

#[derive(Debug, Serialize)]
struct CreateStoryRequest<'a> {
    token: &'a str,
    story: &'a NewStory,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    user: Credentials<'a>,
}

/// Error body: `{ "error": { "status": 401, "title": "...", "message": "..." } }`
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// HTTP client
// =============================================================================

/// Default production API URL
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Blocking HTTP implementation of [`StoryApi`]
#[derive(Debug)]
pub struct HttpStoryApi {
    client: Client,
    base_url: String,
    base: Url,
}

impl HttpStoryApi {
    /// Create a client against the production API
    pub fn new() -> Result<Self> {
        Self::new_with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (staging, mock server)
    pub fn new_with_base_url(base_url: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL with each segment percent-encoded
    ///
    /// Usernames and story ids go in as single segments, so `#`, `?` or `/`
    /// inside them cannot change the route or the query string.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and decode a JSON body
    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request)?;
        response
            .json::<T>()
            .map_err(|e| Error::Other(format!("Failed to parse API response: {}", e)))
    }

    /// Send a request, discarding the body on success
    fn send_unit(&self, request: RequestBuilder) -> Result<()> {
        self.send(request).map(|_| ())
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(map_request_error)?;
        check_response_status(response)
    }
}

/// Map transport errors to user-friendly messages
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::network(format!(
            "Connection timed out after {} seconds",
            REQUEST_TIMEOUT_SECS
        ))
    } else if error.is_connect() {
        Error::network("Unable to connect to the Hack or Snooze API")
    } else {
        Error::network(format!("Request failed: {}", error))
    }
}

/// Turn a non-2xx response into a typed error, using the server message when present
fn check_response_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("Unexpected response")
        .to_string();
    let message = response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
        .and_then(|e| e.error.message.or(e.error.title))
        .unwrap_or(fallback);

    Err(Error::from_status(status.as_u16(), message))
}

impl StoryApi for HttpStoryApi {
    fn name(&self) -> &str {
        "http"
    }

    fn get_stories(&self) -> Result<Vec<Story>> {
        let body: StoriesResponse = self.send_json(self.client.get(self.url(&["stories"])))?;
        Ok(body.stories)
    }

    fn create_story(&self, token: &str, story: &NewStory) -> Result<Story> {
        let request = self
            .client
            .post(self.url(&["stories"]))
            .json(&CreateStoryRequest { token, story });
        let body: StoryResponse = self.send_json(request)?;
        Ok(body.story)
    }

    fn delete_story(&self, token: &str, story_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&["stories", story_id]))
            .json(&TokenRequest { token });
        self.send_unit(request)
    }

    fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let request = self.client.post(self.url(&["signup"])).json(&CredentialsRequest {
            user: Credentials {
                username,
                password,
                name: Some(name),
            },
        });
        self.send_json(request)
    }

    fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let request = self.client.post(self.url(&["login"])).json(&CredentialsRequest {
            user: Credentials {
                username,
                password,
                name: None,
            },
        });
        self.send_json(request)
    }

    fn get_user(&self, token: &str, username: &str) -> Result<UserRecord> {
        let request = self
            .client
            .get(self.url(&["users", username]))
            .query(&[("token", token)]);
        let body: UserResponse = self.send_json(request)?;
        Ok(body.user)
    }

    fn add_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let request = self
            .client
            .post(self.url(&["users", username, "favorites", story_id]))
            .query(&[("token", token)]);
        self.send_unit(request)
    }

    fn remove_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&["users", username, "favorites", story_id]))
            .query(&[("token", token)]);
        self.send_unit(request)
    }
}

// =============================================================================
// Tests
// =============================================================================
