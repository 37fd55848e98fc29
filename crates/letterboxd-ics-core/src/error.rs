//! Failure taxonomy for a render pass.
//!
//! Every failure aborts the whole render; there is no partial output and no
//! internal retry. Constructing a fresh renderer is the only way to retry.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a render pass.
#[derive(Debug, Error)]
pub enum Error {
    /// Username or password was empty; checked before any network call.
    #[error("Cannot log in: Missing username/password")]
    MissingCredentials,

    /// The login handshake failed at the transport level.
    #[error("Cannot log in: {detail}")]
    AuthTransport { detail: String },

    /// The home page did not contain the CSRF literal.
    #[error("Cannot log in: Cannot find CSRF token")]
    CsrfTokenNotFound,

    /// The login POST answered with a non-200 status.
    #[error("Cannot log in: Received HTTP {status}")]
    LoginHttp { status: u16 },

    /// The login POST body was not JSON.
    #[error("Cannot log in: Could not decode response as JSON")]
    LoginResponseNotJson,

    /// The site rejected the credentials.
    #[error("Cannot log in: {message}")]
    LoginRejected { message: String },

    /// The export download answered with a non-200 status.
    #[error("Cannot read export: Received HTTP {status}")]
    ExportHttp { status: u16 },

    /// The export download was not a ZIP archive.
    #[error("Cannot read export: Did not respond with a ZIP file")]
    ExportNotZip,

    /// The diary source could not be opened: missing file, missing archive
    /// member, or corrupt archive.
    #[error("Cannot find event file: {detail}")]
    EventSourceNotFound { detail: String },

    /// A watched-date field did not parse as a date.
    #[error("Cannot parse diary: invalid watched date {raw:?}")]
    InvalidDate { raw: String },

    /// A detail-page field did not parse as a URI.
    #[error("Cannot parse diary: invalid URL {raw:?}")]
    InvalidUrl { raw: String },

    /// Structurally broken diary data: a row with the wrong field count, or
    /// a header missing a required column.
    #[error("Cannot parse diary: {detail}")]
    DiaryMalformed { detail: String },

    /// The options file does not exist.
    #[error("Cannot find options file: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The options file is not valid JSON.
    #[error("Cannot parse options file as JSON")]
    ConfigNotJson,

    /// The options file is JSON of the wrong shape.
    #[error("Invalid options: {detail}")]
    ConfigInvalidShape { detail: String },

    /// A transport failure outside the login handshake.
    #[error("HTTP transport error: {detail}")]
    Transport { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_step() {
        assert_eq!(
            Error::MissingCredentials.to_string(),
            "Cannot log in: Missing username/password"
        );
        assert_eq!(
            Error::LoginHttp { status: 400 }.to_string(),
            "Cannot log in: Received HTTP 400"
        );
        assert_eq!(
            Error::ExportNotZip.to_string(),
            "Cannot read export: Did not respond with a ZIP file"
        );
    }

    #[test]
    fn config_not_found_includes_path() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/etc/letterboxd.json"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot find options file: /etc/letterboxd.json"
        );
    }
}
