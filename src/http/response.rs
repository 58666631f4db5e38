use std::collections::HashMap;

pub use crate::http::status::StatusCode;

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Built once per connection through [`ResponseBuilder`] and never mutated
/// afterwards. The framing headers (`Content-Length` or
/// `Transfer-Encoding`) are always consistent with the `chunked` flag.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
    /// Send the headers only (HEAD requests)
    pub head_only: bool,
    /// Frame the body with chunked transfer encoding
    pub chunked: bool,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body(b"<html></html>".to_vec())
///     .chunked(true)
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    head_only: bool,
    chunked: bool,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
            head_only: false,
            chunked: false,
        }
    }

    /// Adds or replaces a header.
    ///
    /// Framing headers set here are overwritten by [`ResponseBuilder::build`].
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Suppresses the body on the wire while keeping its headers.
    pub fn head_only(mut self, head_only: bool) -> Self {
        self.head_only = head_only;
        self
    }

    /// Requests chunked transfer encoding for the body.
    pub fn chunked(mut self, chunked: bool) -> Self {
        self.chunked = chunked;
        self
    }

    /// Builds the final Response.
    ///
    /// Chunked responses get `Transfer-Encoding: chunked` and never a
    /// `Content-Length`; all others get a `Content-Length` equal to the
    /// body length, even when the body will be suppressed.
    pub fn build(mut self) -> Response {
        self.headers.retain(|k, _| {
            !k.eq_ignore_ascii_case("content-length")
                && !k.eq_ignore_ascii_case("transfer-encoding")
        });

        if self.chunked {
            self.headers
                .insert("Transfer-Encoding".to_string(), "chunked".to_string());
        } else {
            self.headers
                .insert("Content-Length".to_string(), self.body.len().to_string());
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
            head_only: self.head_only,
            chunked: self.chunked,
        }
    }
}

impl Response {
    /// Creates an error response carrying the status's fixed HTML page.
    pub fn error(status: StatusCode) -> Self {
        Self::error_builder(status).build()
    }

    /// Starts an error response so callers can still set flags such as `head_only`.
    pub fn error_builder(status: StatusCode) -> ResponseBuilder {
        let page = status.error_page().unwrap_or_default();

        ResponseBuilder::new(status)
            .header("Content-Type", "text/html")
            .body(page.into_bytes())
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::error(StatusCode::BadRequest)
    }
}
