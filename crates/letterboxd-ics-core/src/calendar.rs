//! In-memory calendar model.

use crate::event::Event;

/// A calendar ready for serialization.
///
/// Events keep their insertion order; the serializer emits them exactly as
/// stored. The model is built once per render and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    /// Product identifier (`-//StarSquare//LETTERBOXD//{version}//EN`).
    pub prod_id: String,
    /// Calendar display name (`X-WR-CALNAME`).
    pub name: Option<String>,
    /// Calendar description (`X-WR-CALDESC`).
    pub description: Option<String>,
    /// Timezone identifier, emitted as a `VTIMEZONE` sub-component.
    pub timezone: Option<String>,
    /// Suggested refresh interval (`X-PUBLISHED-TTL`), e.g. `PT1H`.
    pub published_ttl: Option<String>,
    /// Events in source order.
    pub events: Vec<Event>,
}

impl Calendar {
    /// Creates an empty calendar with the given product identifier.
    pub fn new(prod_id: impl Into<String>) -> Self {
        Self {
            prod_id: prod_id.into(),
            name: None,
            description: None,
            timezone: None,
            published_ttl: None,
            events: Vec::new(),
        }
    }

    /// Sets the calendar display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the calendar description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the timezone identifier.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the suggested refresh interval.
    #[must_use]
    pub fn with_published_ttl(mut self, ttl: impl Into<String>) -> Self {
        self.published_ttl = Some(ttl.into());
        self
    }

    /// Appends an event, preserving insertion order.
    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use url::Url;

    fn event(summary: &str) -> Event {
        Event::new(
            summary,
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            "",
            Url::parse("https://example.com/").unwrap(),
        )
    }

    #[test]
    fn events_keep_insertion_order() {
        let mut calendar = Calendar::new("-//StarSquare//LETTERBOXD//0.1.0//EN");
        calendar.add_event(event("First"));
        calendar.add_event(event("Second"));
        calendar.add_event(event("Third"));

        let summaries: Vec<&str> = calendar.events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, ["First", "Second", "Third"]);
    }

    #[test]
    fn builder_fills_optional_metadata() {
        let calendar = Calendar::new("-//StarSquare//LETTERBOXD//0.1.0//EN")
            .with_name("Films")
            .with_description("Watched films")
            .with_timezone("Europe/London")
            .with_published_ttl("PT1H");

        assert_eq!(calendar.name.as_deref(), Some("Films"));
        assert_eq!(calendar.description.as_deref(), Some("Watched films"));
        assert_eq!(calendar.timezone.as_deref(), Some("Europe/London"));
        assert_eq!(calendar.published_ttl.as_deref(), Some("PT1H"));
    }
}
