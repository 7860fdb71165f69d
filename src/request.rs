//! Owned snapshots of the request and response state that formatters read.
//!
//! Log lines are rendered on a detached task, possibly long after the
//! response has been sent and the handler's borrows have ended. Formatters
//! therefore never see the live request or response; they see
//! [`RequestInfo`] and [`ResponseInfo`], cheap owned copies of the fields
//! that remain meaningful after the handler returns. Streaming state such as
//! body content is deliberately not captured.

use http::{Method, Request, Response, StatusCode, Uri};

/// The parts of an HTTP request that a log line can safely refer to:
/// the method token and the URI (path and query string).
#[derive(Clone, Debug)]
pub struct RequestInfo {
    method: Method,
    uri: Uri,
}

impl RequestInfo {
    /// Builds a snapshot from its parts.
    ///
    /// The `From<&http::Request<B>>` impl is usually more convenient.
    pub fn new(method: Method, uri: Uri) -> Self {
        RequestInfo { method, uri }
    }

    /// The request's method token.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URL path component, without the query string.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The raw query string, if the URI carried one.
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// The first value of the query parameter named `name`, percent-decoded.
    pub fn query(&self, name: &str) -> Option<String> {
        let raw = self.uri.query()?;
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).ok()?;
        pairs
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl<B> From<&Request<B>> for RequestInfo {
    fn from(request: &Request<B>) -> Self {
        RequestInfo {
            method: request.method().clone(),
            uri: request.uri().clone(),
        }
    }
}

/// The response state retained for formatters.
///
/// None of the built-in formatters read the response, but contributed
/// formatters can use the status code.
#[derive(Clone, Debug)]
pub struct ResponseInfo {
    status: StatusCode,
}

impl ResponseInfo {
    /// Builds a snapshot from a status code.
    pub fn new(status: StatusCode) -> Self {
        ResponseInfo { status }
    }

    /// The response's status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<B> From<&Response<B>> for ResponseInfo {
    fn from(response: &Response<B>) -> Self {
        ResponseInfo {
            status: response.status(),
        }
    }
}
