//! Diary event model.

use chrono::NaiveDate;
use url::Url;

/// One watched-film entry, ready to be emitted as a `VEVENT`.
///
/// Events carry a calendar date only; a diary entry is an all-day
/// occurrence, never a timed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Film title, used as the event summary.
    pub summary: String,
    /// The day the film was watched.
    pub date: NaiveDate,
    /// Derived `Year:`/`Rating:` text.
    pub description: String,
    /// Detail page for the diary entry.
    pub url: Url,
}

impl Event {
    pub fn new(
        summary: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        url: Url,
    ) -> Self {
        Self {
            summary: summary.into(),
            date,
            description: description.into(),
            url,
        }
    }
}
