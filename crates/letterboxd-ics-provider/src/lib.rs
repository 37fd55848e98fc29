//! Letterboxd access: session, login, export download, diary parsing, and
//! the render orchestrator.
//!
//! The pipeline for one render pass:
//!
//! ```text
//! CalendarRenderer
//!     └── ExportFetcher ── login() ── Session ── Transport
//!             │
//!             ▼
//!        ExportHandle ──▶ diary::parse ──▶ Vec<Event>
//!             │
//!             ▼
//!        Calendar ──▶ ics::serialize ──▶ RenderedOutput (cached)
//! ```
//!
//! All I/O is synchronous and sequential; one renderer owns one session and
//! renders at most once.

pub mod auth;
pub mod diary;
pub mod export;
pub mod render;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{Credentials, login};
pub use export::{ExportFetcher, ExportHandle};
pub use render::{CalendarMeta, CalendarRenderer, RenderOptions, RenderedOutput};
pub use session::{
    HttpRequest, HttpResponse, Method, ReqwestTransport, Session, Transport, TransportError,
};
