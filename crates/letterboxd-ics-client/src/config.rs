//! JSON options file.
//!
//! ```json
//! {
//!     "auth": { "username": "user", "password": "secret" },
//!     "calendar": {
//!         "name": "Films",
//!         "description": "Calendar for films logged in Letterboxd",
//!         "timezone": "Europe/London"
//!     },
//!     "output": { "errors": true, "content-type": "text/plain" }
//! }
//! ```
//!
//! Unset sections keep their defaults; an optional top-level `file` points
//! at a local diary CSV and bypasses the network entirely.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use letterboxd_ics_core::Error;
use letterboxd_ics_provider::{CalendarMeta, Credentials, RenderOptions};

/// Options for one render, usually loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version stamped into the product identifier and User-Agent.
    pub version: String,

    pub auth: AuthConfig,

    pub calendar: CalendarConfig,

    pub output: OutputConfig,

    /// Local diary CSV; set, it bypasses login and download.
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            auth: AuthConfig::default(),
            calendar: CalendarConfig::default(),
            output: OutputConfig::default(),
            file: None,
        }
    }
}

/// Letterboxd account credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

/// Calendar-level metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub timezone: Option<String>,
    /// Suggested refresh interval, e.g. `PT1H`.
    pub ttl: Option<String>,
}

/// Output-layer behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit the HTTP response headers before the body.
    pub headers: bool,
    /// Surface failure messages as the response body.
    pub errors: bool,
    #[serde(rename = "content-type")]
    pub content_type: String,
    pub charset: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            headers: true,
            errors: false,
            content_type: "text/calendar".to_string(),
            charset: "utf-8".to_string(),
        }
    }
}

impl Config {
    /// Loads options from a JSON file.
    ///
    /// Syntax errors and shape errors are reported separately so a caller
    /// can tell a truncated file from a mistyped one.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.to_path_buf(),
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|_| Error::ConfigNotJson)?;
        serde_json::from_value(value).map_err(|e| Error::ConfigInvalidShape {
            detail: e.to_string(),
        })
    }

    /// The provider-side options for one render pass.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            version: self.version.clone(),
            credentials: Credentials::new(&self.auth.username, &self.auth.password),
            calendar: CalendarMeta {
                name: self.calendar.name.clone(),
                description: self.calendar.description.clone(),
                timezone: self.calendar.timezone.clone(),
                ttl: self.calendar.ttl.clone(),
            },
            file: self.file.clone(),
            surface_errors: self.output.errors,
        }
    }
}
