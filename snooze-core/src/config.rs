//! Configuration management
//!
//! Settings live in `settings.json` inside the snooze directory:
//! ```json
//! {
//!   "app": { "baseUrl": "https://hack-or-snooze-v3.herokuapp.com", "demoMode": false },
//!   "session": { "username": "hueter", "token": "..." }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::http::DEFAULT_BASE_URL;

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "SNOOZE_BASE_URL";

/// Environment variable overriding demo mode
pub const DEMO_MODE_ENV: &str = "SNOOZE_DEMO_MODE";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<StoredSession>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Credentials remembered between runs for session restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub username: String,
    pub token: String,
}

/// Snooze configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub demo_mode: bool,
    pub session: Option<StoredSession>,
    // Keep the raw settings so unmanaged fields survive a save
    raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            demo_mode: false,
            session: None,
            raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the snooze directory
    ///
    /// `SNOOZE_BASE_URL` and `SNOOZE_DEMO_MODE` take precedence over the file.
    pub fn load(snooze_dir: &Path) -> Result<Self> {
        let settings_path = snooze_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| raw.app.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let demo_mode = match std::env::var(DEMO_MODE_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        Ok(Self {
            base_url,
            demo_mode,
            session: raw.session.clone(),
            raw_settings: raw,
        })
    }

    /// Save config to the snooze directory, preserving fields we don't manage
    pub fn save(&self, snooze_dir: &Path) -> Result<()> {
        let settings_path = snooze_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content)
                .unwrap_or_else(|_| self.raw_settings.clone())
        } else {
            self.raw_settings.clone()
        };

        settings.app.demo_mode = self.demo_mode;
        settings.app.base_url = if self.base_url == DEFAULT_BASE_URL {
            None
        } else {
            Some(self.base_url.clone())
        };
        settings.session = self.session.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }

    /// Remember credentials for the next run
    pub fn store_session(&mut self, username: impl Into<String>, token: impl Into<String>) {
        self.session = Some(StoredSession {
            username: username.into(),
            token: token.into(),
        });
    }

    pub fn clear_session(&mut self) {
        self.session = None;
    }
}
