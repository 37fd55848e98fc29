//! Core types: errors, events, calendar model, iCalendar serialization

pub mod calendar;
pub mod error;
pub mod event;
pub mod ics;
pub mod tracing;

pub use calendar::Calendar;
pub use error::Error;
pub use event::Event;
pub use tracing::{TracingError, TracingFormat, init_tracing};
