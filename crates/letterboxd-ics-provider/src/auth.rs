//! Letterboxd login handshake.
//!
//! The site embeds a CSRF literal in its home-page markup; login is a form
//! POST of the credentials plus that token, answered with a small JSON
//! document. The token pattern is a contract with the site, not general
//! HTML parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use letterboxd_ics_core::Error;

use crate::session::Session;

/// Home page; the CSRF literal lives in its markup.
pub const HOME_URL: &str = "https://letterboxd.com/";

/// Login endpoint accepting the credential form.
pub const LOGIN_URL: &str = "https://letterboxd.com/user/login.do";

/// Form field carrying the CSRF token.
const CSRF_FIELD: &str = "__csrf";

/// Matches `CSRF = "<token>"` or `CSRF = '<token>'`, first occurrence.
static CSRF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"CSRF = (?:"(?P<dq>[^"]+)"|'(?P<sq>[^']+)')"#).expect("invalid CSRF regex")
});

/// Letterboxd account credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True when either half is empty.
    pub fn is_incomplete(&self) -> bool {
        self.username.is_empty() || self.password.is_empty()
    }
}

/// Logs the session in.
///
/// On success the session's cookie jar holds the authenticated cookie the
/// export download relies on; there is no other return value.
pub fn login(session: &Session, credentials: &Credentials) -> Result<(), Error> {
    if credentials.is_incomplete() {
        return Err(Error::MissingCredentials);
    }

    let home = session.get(HOME_URL).map_err(|e| Error::AuthTransport {
        detail: e.to_string(),
    })?;
    let token = extract_csrf(&home.text()).ok_or(Error::CsrfTokenNotFound)?;
    debug!("extracted CSRF token");

    info!("logging in");
    let response = session
        .submit_form(
            LOGIN_URL,
            &[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                (CSRF_FIELD, token.as_str()),
            ],
        )
        .map_err(|e| Error::AuthTransport {
            detail: e.to_string(),
        })?;

    if response.status != 200 {
        warn!(status = response.status, "login HTTP error");
        return Err(Error::LoginHttp {
            status: response.status,
        });
    }

    let outcome: Value =
        serde_json::from_slice(&response.body).map_err(|_| Error::LoginResponseNotJson)?;

    if outcome.get("result").and_then(Value::as_str) == Some("error") {
        let message = outcome
            .get("messages")
            .and_then(|messages| messages.get(0))
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        warn!(%message, "login rejected");
        return Err(Error::LoginRejected { message });
    }

    info!("login completed");
    Ok(())
}

/// Pulls the CSRF token out of home-page markup.
fn extract_csrf(body: &str) -> Option<String> {
    CSRF_REGEX
        .captures(body)
        .and_then(|caps| caps.name("dq").or_else(|| caps.name("sq")))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, ok_response, typed_response};

    const HOME_BODY: &str = r#"<html><script>var CSRF = "token-123";</script></html>"#;

    fn credentials() -> Credentials {
        Credentials::new("user", "secret")
    }

    #[test]
    fn empty_credentials_fail_before_any_network_call() {
        let mock = MockTransport::new();
        let session = mock.session();

        let err = login(&session, &Credentials::new("", "secret")).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));

        let err = login(&session, &Credentials::new("user", "")).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));

        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn home_page_transport_error_maps_to_auth_transport() {
        let mock = MockTransport::new();
        mock.push_error("connection refused");

        let err = login(&mock.session(), &credentials()).unwrap_err();
        assert!(matches!(err, Error::AuthTransport { .. }));
    }

    #[test]
    fn missing_csrf_literal_is_detected() {
        let mock = MockTransport::new();
        mock.push_response(ok_response("<html>no token here</html>"));

        let err = login(&mock.session(), &credentials()).unwrap_err();
        assert!(matches!(err, Error::CsrfTokenNotFound));
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn csrf_extraction_handles_both_quote_styles() {
        assert_eq!(
            extract_csrf(r#"CSRF = "abc123""#).as_deref(),
            Some("abc123")
        );
        assert_eq!(extract_csrf(r"CSRF = 'abc123'").as_deref(), Some("abc123"));
        assert_eq!(extract_csrf("no token"), None);
    }

    #[test]
    fn csrf_extraction_takes_the_first_occurrence() {
        let body = r#"CSRF = "first" and later CSRF = "second""#;
        assert_eq!(extract_csrf(body).as_deref(), Some("first"));
    }

    #[test]
    fn login_posts_credentials_and_token() {
        let mock = MockTransport::new();
        mock.push_response(ok_response(HOME_BODY));
        mock.push_response(ok_response(r#"{"result":"success"}"#));

        login(&mock.session(), &credentials()).unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, HOME_URL);
        assert_eq!(requests[1].url, LOGIN_URL);

        let body = String::from_utf8(requests[1].body.clone().unwrap()).unwrap();
        assert_eq!(body, "username=user&password=secret&__csrf=token-123");
    }

    #[test]
    fn non_200_login_status_is_an_error() {
        let mock = MockTransport::new();
        mock.push_response(ok_response(HOME_BODY));
        mock.push_response(typed_response(400, "text/html", b"bad request".to_vec()));

        let err = login(&mock.session(), &credentials()).unwrap_err();
        assert!(matches!(err, Error::LoginHttp { status: 400 }));
    }

    #[test]
    fn non_json_login_body_is_an_error() {
        let mock = MockTransport::new();
        mock.push_response(ok_response(HOME_BODY));
        mock.push_response(ok_response("<html>definitely not json</html>"));

        let err = login(&mock.session(), &credentials()).unwrap_err();
        assert!(matches!(err, Error::LoginResponseNotJson));
    }

    #[test]
    fn rejected_login_carries_the_first_message() {
        let mock = MockTransport::new();
        mock.push_response(ok_response(HOME_BODY));
        mock.push_response(ok_response(
            r#"{"result":"error","messages":["x","ignored"]}"#,
        ));

        let err = login(&mock.session(), &credentials()).unwrap_err();
        match err {
            Error::LoginRejected { message } => assert_eq!(message, "x"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn any_other_json_shape_is_success() {
        let mock = MockTransport::new();
        mock.push_response(ok_response(HOME_BODY));
        mock.push_response(ok_response(r#"{"something":"else"}"#));

        login(&mock.session(), &credentials()).unwrap();
    }
}
