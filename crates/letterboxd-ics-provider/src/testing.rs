//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::session::{HttpRequest, HttpResponse, Session, Transport, TransportError};

/// Records every request and replays canned responses in order.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the session owns another.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<HttpRequest>,
    responses: VecDeque<Result<HttpResponse, String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.state.borrow_mut().responses.push_back(Ok(response));
    }

    pub fn push_error(&self, message: &str) {
        self.state
            .borrow_mut()
            .responses
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    /// A session driving this transport, with a test version stamp.
    pub fn session(&self) -> Session {
        Session::with_transport(Box::new(self.clone()), "0.0.0-test")
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        match state.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError(message)),
            None => Err(TransportError("no canned response left".to_string())),
        }
    }
}

/// A 200 response with a text body and no headers.
pub(crate) fn ok_response(body: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        headers: Vec::new(),
        body: body.as_bytes().to_vec(),
    }
}

/// A response with an explicit status, content type, and raw body.
pub(crate) fn typed_response(status: u16, content_type: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("Content-Type".to_string(), content_type.to_string())],
        body,
    }
}
