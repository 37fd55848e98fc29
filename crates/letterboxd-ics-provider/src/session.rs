//! Cookie-carrying HTTP session.
//!
//! Every request issued through one [`Session`] carries the fixed
//! `letterboxd-ics` User-Agent and replays any cookies set by earlier
//! responses on the same instance. The wire work lives behind the
//! [`Transport`] trait so the login handshake can be exercised without a
//! network.

use thiserror::Error;
use url::form_urlencoded;

/// A transport-level failure: connection, TLS, invalid URL.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP method of an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request handed to the [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Returns the first header with the given name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response returned by the [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns the first header with the given name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the body as text, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The wire seam under [`Session`].
///
/// Implementations keep their own cookie state: cookies set by one response
/// must be attached to later requests sent through the same transport value.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// A cookie-carrying HTTP session with a fixed identifying header.
pub struct Session {
    transport: Box<dyn Transport>,
    user_agent: String,
}

impl Session {
    /// Creates a session backed by a blocking reqwest client.
    pub fn new(version: &str) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            Box::new(ReqwestTransport::new()?),
            version,
        ))
    }

    /// Creates a session over an injected transport.
    pub fn with_transport(transport: Box<dyn Transport>, version: &str) -> Self {
        Self {
            transport,
            user_agent: format!("letterboxd-ics/{version} (https://bux.re/letterboxd-ics)"),
        }
    }

    /// The identifying header value attached to every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Issues a request. The session User-Agent is merged in last; a
    /// caller-supplied User-Agent is replaced, never honored.
    pub fn request(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, TransportError> {
        let mut merged: Vec<(String, String)> = headers
            .iter()
            .filter(|(key, _)| !key.eq_ignore_ascii_case("user-agent"))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        merged.push(("User-Agent".to_string(), self.user_agent.clone()));

        self.transport.send(&HttpRequest {
            method,
            url: url.to_string(),
            headers: merged,
            body,
        })
    }

    /// Issues a plain GET.
    pub fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.request(Method::Get, url, &[], None)
    }

    /// Submits an `application/x-www-form-urlencoded` POST.
    pub fn submit_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().copied())
            .finish();
        self.request(
            Method::Post,
            url,
            &[("Content-Type", "application/x-www-form-urlencoded")],
            Some(body.into_bytes()),
        )
    }
}

/// [`Transport`] backed by a blocking reqwest client with a cookie store.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|e| TransportError(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
