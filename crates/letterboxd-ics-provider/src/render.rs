//! Render orchestration.
//!
//! One [`CalendarRenderer`] owns one session and renders at most once;
//! repeated calls return the cached output without touching the network or
//! re-parsing the source.

use std::path::PathBuf;

use tracing::{debug, error};

use letterboxd_ics_core::{Calendar, Error, ics};

use crate::auth::Credentials;
use crate::diary;
use crate::export::ExportFetcher;
use crate::session::Session;

/// Product identifier stamped into the feed.
fn prod_id(version: &str) -> String {
    format!("-//StarSquare//LETTERBOXD//{version}//EN")
}

/// Calendar-level metadata copied into the feed.
#[derive(Debug, Clone, Default)]
pub struct CalendarMeta {
    pub name: Option<String>,
    pub description: Option<String>,
    pub timezone: Option<String>,
    /// Suggested refresh interval, e.g. `PT1H`.
    pub ttl: Option<String>,
}

/// Everything one render pass needs.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Version stamped into the product identifier and User-Agent.
    pub version: String,
    pub credentials: Credentials,
    pub calendar: CalendarMeta,
    /// Local CSV path; when set, login and download are skipped.
    pub file: Option<PathBuf>,
    /// Surface failure messages as the output body instead of suppressing
    /// them behind an empty body.
    pub surface_errors: bool,
}

/// The serialized feed plus its content fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub text: String,
    /// md5 hex digest of `text`, for ETag-style conditional serving.
    pub etag: String,
}

/// Sequences fetch, parse, build, and serialize; caches the result.
pub struct CalendarRenderer {
    options: RenderOptions,
    session: Session,
    output: Option<RenderedOutput>,
}

impl CalendarRenderer {
    /// Creates a renderer with a real network session.
    pub fn new(options: RenderOptions) -> Result<Self, Error> {
        let session = Session::new(&options.version).map_err(|e| Error::Transport {
            detail: e.to_string(),
        })?;
        Ok(Self::with_session(options, session))
    }

    /// Creates a renderer over an injected session.
    pub fn with_session(options: RenderOptions, session: Session) -> Self {
        Self {
            options,
            session,
            output: None,
        }
    }

    /// Renders the feed, or returns the cached output of an earlier call.
    pub fn render(&mut self) -> Result<&RenderedOutput, Error> {
        if self.output.is_none() {
            let output = self.render_uncached()?;
            self.output = Some(output);
        }
        Ok(self.output.as_ref().expect("output cached above"))
    }

    fn render_uncached(&self) -> Result<RenderedOutput, Error> {
        let fetcher = ExportFetcher::new(self.options.file.clone());
        let handle = fetcher.fetch(&self.session, &self.options.credentials)?;
        let events = diary::parse(&handle)?;

        let mut calendar = Calendar::new(prod_id(&self.options.version));
        calendar.name = self.options.calendar.name.clone();
        calendar.description = self.options.calendar.description.clone();
        calendar.timezone = self.options.calendar.timezone.clone();
        calendar.published_ttl = self.options.calendar.ttl.clone();
        for event in events {
            calendar.add_event(event);
        }

        debug!(events = calendar.events.len(), "serializing calendar");
        let text = ics::serialize(&calendar);
        let etag = format!("{:x}", md5::compute(&text));
        Ok(RenderedOutput { text, etag })
    }

    /// String-conversion entry point: the rendered text, or the failure
    /// handled per the configured policy.
    pub fn render_string(&mut self) -> String {
        let surface_errors = self.options.surface_errors;
        match self.render() {
            Ok(output) => output.text.clone(),
            Err(err) if surface_errors => err.to_string(),
            Err(err) => {
                error!(%err, "render failed");
                String::new()
            }
        }
    }
}
