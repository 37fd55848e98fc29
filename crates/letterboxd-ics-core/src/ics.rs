//! iCalendar text serialization.
//!
//! Emits RFC 5545 `VCALENDAR` text with a fixed top-level property order:
//! `PRODID`, `VERSION`, `CALSCALE`, then the optional `X-PUBLISHED-TTL`,
//! `X-WR-CALNAME` and `X-WR-CALDESC`, then nested components. Feed
//! consumers key off the first lines, so the order is a compatibility
//! contract.
//!
//! Serialization is pure: equal models produce byte-identical output.
//! Event UIDs are derived from event content rather than generated, so a
//! re-render of the same diary yields the same bytes.

use crate::calendar::Calendar;
use crate::event::Event;

const CRLF: &str = "\r\n";

/// Maximum line length in octets before folding, per RFC 5545 §3.1.
const FOLD_WIDTH: usize = 75;

/// Serializes a calendar to iCalendar text.
pub fn serialize(calendar: &Calendar) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("BEGIN:VCALENDAR".to_string());
    lines.push(property("PRODID", &calendar.prod_id));
    lines.push("VERSION:2.0".to_string());
    lines.push("CALSCALE:GREGORIAN".to_string());
    if let Some(ttl) = &calendar.published_ttl {
        lines.push(property("X-PUBLISHED-TTL", ttl));
    }
    if let Some(name) = &calendar.name {
        lines.push(property("X-WR-CALNAME", name));
    }
    if let Some(description) = &calendar.description {
        lines.push(property("X-WR-CALDESC", description));
    }

    if let Some(timezone) = &calendar.timezone {
        lines.push("BEGIN:VTIMEZONE".to_string());
        lines.push(property("TZID", timezone));
        lines.push("END:VTIMEZONE".to_string());
    }

    for event in &calendar.events {
        push_event(&mut lines, event);
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = String::new();
    for line in &lines {
        output.push_str(&fold(line));
        output.push_str(CRLF);
    }
    output
}

fn push_event(lines: &mut Vec<String>, event: &Event) {
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}", event_uid(event)));
    lines.push(property("SUMMARY", &event.summary));
    lines.push(property("DESCRIPTION", &event.description));
    lines.push(format!(
        "DTSTART;VALUE=DATE:{}",
        event.date.format("%Y%m%d")
    ));
    lines.push(format!("URL;VALUE=URI:{}", event.url));
    lines.push("END:VEVENT".to_string());
}

/// Content-derived UID: stable across renders of the same diary.
fn event_uid(event: &Event) -> String {
    let digest = md5::compute(format!("{}{}", event.date, event.url));
    format!("{digest:x}@letterboxd-ics")
}

fn property(name: &str, value: &str) -> String {
    format!("{}:{}", name, escape_text(value))
}

/// Escapes a TEXT value per RFC 5545 §3.3.11.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Folds a content line at 75 octets, breaking on UTF-8 boundaries.
/// Continuation lines start with a single space that counts toward the
/// limit.
fn fold(line: &str) -> String {
    if line.len() <= FOLD_WIDTH {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + 8);
    let mut width = 0;
    for ch in line.chars() {
        let octets = ch.len_utf8();
        if width + octets > FOLD_WIDTH {
            out.push_str(CRLF);
            out.push(' ');
            width = 1;
        }
        out.push(ch);
        width += octets;
    }
    out
}
