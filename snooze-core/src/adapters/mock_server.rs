//! Mock Hack or Snooze API server for testing
//!
//! Serves the real API's routes and JSON shapes over HTTP, backed by a
//! [`DemoStoryApi`], so the HTTP adapter can be exercised end to end:
//! - GET /stories returns { stories: [...] }
//! - POST /stories returns { story }
//! - POST /signup and POST /login return { user, token }
//! - GET /users/{username}?token= returns { user }
//! - errors return { error: { status, title, message } }

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use serde_json::{json, Value as JsonValue};
use url::Url;

use super::demo::DemoStoryApi;
use crate::domain::result::Error;
use crate::domain::NewStory;
use crate::ports::StoryApi;

/// Mock API server for testing
pub struct MockApiServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for the mock server
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Answer every request with 503 Service Unavailable
    pub unavailable: bool,
    /// Answer every request with a body that is not JSON
    pub garbage_body: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

struct Request {
    method: String,
    /// Percent-decoded path segments
    segments: Vec<String>,
    token: Option<String>,
    body: JsonValue,
}

impl MockApiServer {
    /// Start a server backed by the seeded demo API on a random port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        Self::start_with_api(config, Arc::new(DemoStoryApi::seeded()))
    }

    /// Start a server backed by the given API
    pub fn start_with_api(config: MockConfig, api: Arc<DemoStoryApi>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        // Non-blocking accept so stop() can end the loop
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let api = api.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &api);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, api: &DemoStoryApi) {
    let _ = stream.set_nonblocking(false);

    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => {
            send_response(&mut stream, 400, r#"{"error": {"status": 400, "message": "Invalid request"}}"#);
            return;
        }
    };

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if config.unavailable {
        send_error(&mut stream, 503, "Service Unavailable");
        return;
    }
    if config.garbage_body {
        send_response(&mut stream, 200, "<html>not json</html>");
        return;
    }

    match route(&request, api) {
        Ok((status, body)) => send_response(&mut stream, status, &body.to_string()),
        Err(e) => {
            let status = match &e {
                Error::Validation(_) => 400,
                Error::Unauthorized(_) => 401,
                Error::NotFound(_) => 404,
                Error::Conflict(_) => 409,
                _ => 500,
            };
            let message = match e {
                Error::Validation(m)
                | Error::Unauthorized(m)
                | Error::NotFound(m)
                | Error::Conflict(m) => m,
                other => other.to_string(),
            };
            send_error(&mut stream, status, &message);
        }
    }
}

fn route(req: &Request, api: &DemoStoryApi) -> Result<(u16, JsonValue), Error> {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    let token = || {
        req.token
            .clone()
            .or_else(|| req.body.get("token").and_then(|t| t.as_str()).map(String::from))
            .unwrap_or_default()
    };

    match (req.method.as_str(), segments.as_slice()) {
        ("GET", ["stories"]) => Ok((200, json!({ "stories": api.get_stories()? }))),
        ("POST", ["stories"]) => {
            let story: NewStory = serde_json::from_value(
                req.body.get("story").cloned().unwrap_or(JsonValue::Null),
            )
            .map_err(|e| Error::validation(e.to_string()))?;
            let created = api.create_story(&token(), &story)?;
            Ok((201, json!({ "story": created })))
        }
        ("DELETE", ["stories", id]) => {
            api.delete_story(&token(), id)?;
            Ok((200, json!({ "message": "Deleted story" })))
        }
        ("POST", ["signup"]) => {
            let user = &req.body["user"];
            let auth = api.signup(
                user["username"].as_str().unwrap_or_default(),
                user["password"].as_str().unwrap_or_default(),
                user["name"].as_str().unwrap_or_default(),
            )?;
            Ok((201, json!({ "user": auth.user, "token": auth.token })))
        }
        ("POST", ["login"]) => {
            let user = &req.body["user"];
            let auth = api.login(
                user["username"].as_str().unwrap_or_default(),
                user["password"].as_str().unwrap_or_default(),
            )?;
            Ok((200, json!({ "user": auth.user, "token": auth.token })))
        }
        ("GET", ["users", username]) => {
            let user = api.get_user(&token(), username)?;
            Ok((200, json!({ "user": user })))
        }
        ("POST", ["users", username, "favorites", id]) => {
            api.add_favorite(&token(), username, id)?;
            Ok((200, json!({ "message": "Favorite Added!" })))
        }
        ("DELETE", ["users", username, "favorites", id]) => {
            api.remove_favorite(&token(), username, id)?;
            Ok((200, json!({ "message": "Favorite Removed!" })))
        }
        _ => Err(Error::not_found("Endpoint not found")),
    }
}

/// Read one HTTP request: head up to the blank line, then Content-Length bytes of body
fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let head_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let mut parts = head.lines().next()?.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;
    let url = Url::parse(&format!("http://localhost{}", target)).ok()?;
    let token = url
        .query_pairs()
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned());

    let segments = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).map(|d| d.into_owned()))
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    let body_bytes = &data[head_end..(head_end + content_length).min(data.len())];
    let body = serde_json::from_slice(body_bytes).unwrap_or(JsonValue::Null);

    Some(Request {
        method,
        segments,
        token,
        body,
    })
}

fn send_error(stream: &mut TcpStream, status: u16, message: &str) {
    let body = json!({
        "error": { "status": status, "title": status_text(status), "message": message }
    });
    send_response(stream, status, &body.to_string());
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        409 => "Conflict",
        503 => "Service Unavailable",
        _ => "Internal Server Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::demo::{DEMO_PASSWORD, DEMO_USERNAME};
    use crate::adapters::http::HttpStoryApi;

    fn client(server: &MockApiServer) -> HttpStoryApi {
        HttpStoryApi::new_with_base_url(&server.base_url()).unwrap()
    }

    #[test]
    fn test_mock_server_starts() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
    }

    #[test]
    fn test_get_stories_over_http() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let stories = client(&server).get_stories().unwrap();
        assert_eq!(stories.len(), 4);
        assert_eq!(stories[0].story_id, "11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn test_login_and_get_user_over_http() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let api = client(&server);

        let auth = api.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
        assert_eq!(auth.user.username, DEMO_USERNAME);

        let user = api.get_user(&auth.token, DEMO_USERNAME).unwrap();
        assert_eq!(user.favorites.len(), 1);
    }

    #[test]
    fn test_create_and_delete_story_over_http() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let api = client(&server);
        let token = api.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap().token;

        let created = api
            .create_story(&token, &NewStory::new("Over the wire", "Me", "https://wire.example"))
            .unwrap();
        assert_eq!(created.title, "Over the wire");
        assert_eq!(api.get_stories().unwrap().len(), 5);

        api.delete_story(&token, &created.story_id).unwrap();
        assert_eq!(api.get_stories().unwrap().len(), 4);
    }

    #[test]
    fn test_favorites_over_http() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let api = client(&server);
        let token = api.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap().token;
        let story_id = "22222222-2222-2222-2222-222222222222";

        api.add_favorite(&token, DEMO_USERNAME, story_id).unwrap();
        let user = api.get_user(&token, DEMO_USERNAME).unwrap();
        assert!(user.favorites.iter().any(|s| s.story_id == story_id));

        api.remove_favorite(&token, DEMO_USERNAME, story_id).unwrap();
        let user = api.get_user(&token, DEMO_USERNAME).unwrap();
        assert!(!user.favorites.iter().any(|s| s.story_id == story_id));
    }

    #[test]
    fn test_bad_token_maps_to_unauthorized() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let err = client(&server).get_user("bogus", DEMO_USERNAME).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert!(err.to_string().contains("Invalid token"));
    }

    #[test]
    fn test_duplicate_signup_maps_to_conflict() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let err = client(&server)
            .signup(DEMO_USERNAME, "pw", "Dup")
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_username_with_reserved_characters_round_trips() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let api = client(&server);

        for username in ["ann#1", "bob?admin=1", "cy/dee", "dee 100%"] {
            let token = api.signup(username, "pw", "Odd Name").unwrap().token;
            let user = api.get_user(&token, username).unwrap();
            assert_eq!(user.username, username);

            let story_id = "22222222-2222-2222-2222-222222222222";
            api.add_favorite(&token, username, story_id).unwrap();
            let user = api.get_user(&token, username).unwrap();
            assert_eq!(user.favorites.len(), 1);

            api.remove_favorite(&token, username, story_id).unwrap();
            assert!(api.get_user(&token, username).unwrap().favorites.is_empty());
        }
    }

    #[test]
    fn test_unavailable_maps_to_api_error() {
        let server = MockApiServer::start(MockConfig {
            unavailable: true,
            ..Default::default()
        })
        .unwrap();
        let err = client(&server).get_stories().unwrap_err();
        assert!(matches!(err, Error::Api { status: 503, .. }));
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        let server = MockApiServer::start(MockConfig {
            garbage_body: true,
            ..Default::default()
        })
        .unwrap();
        let err = client(&server).get_stories().unwrap_err();
        assert!(err.to_string().contains("Failed to parse API response"));
    }
}
