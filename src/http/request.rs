use std::collections::{BTreeMap, HashMap};

/// HTTP request methods the server implements.
///
/// The parser accepts any method token; the dispatcher maps the token onto
/// this set and answers 501 Not Implemented for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit parameters, echoed back by the parameters page
    POST,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// TRACE - Echo the received request back to the client
    TRACE,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string names an implemented method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::request::Method;
    /// assert_eq!(Method::from_str("TRACE"), Some(Method::TRACE));
    /// assert_eq!(Method::from_str("DELETE"), None);
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "HEAD" => Some(Method::HEAD),
            "TRACE" => Some(Method::TRACE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::HEAD => "HEAD",
            Method::TRACE => "TRACE",
        }
    }
}

/// A fully validated HTTP request read from one connection.
///
/// Only the parser constructs values of this type; a `Request` never
/// exists for input that failed validation.
#[derive(Debug, Clone)]
pub struct Request {
    /// The method token exactly as sent (not yet checked against [`Method`])
    pub method: String,
    /// Request path with the query string removed and `../` sequences deleted
    pub path: String,
    /// HTTP version, `HTTP/1.0` or `HTTP/1.1`
    pub version: String,
    /// Query string and (for POST) form body parameters; last write wins
    pub params: BTreeMap<String, String>,
    /// Declared body length, 0 when no `Content-Length` was sent
    pub content_length: usize,
    /// Client asked for a chunked response (`Chunked: yes`)
    pub chunked: bool,
    /// Headers as sent, for diagnostics only
    pub headers: HashMap<String, String>,
    /// Header block as sent, request line included
    pub raw_headers: String,
    /// Every byte read for this request, body included
    pub raw: Vec<u8>,
    /// Request body
    pub body: Vec<u8>,
}

impl Request {
    /// The implemented method this request names, if any.
    pub fn method(&self) -> Option<Method> {
        Method::from_str(&self.method)
    }

    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Parameters that carry a non-empty value.
    pub fn filled_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether at least one parameter has a non-empty value.
    pub fn has_param_values(&self) -> bool {
        self.filled_params().next().is_some()
    }
}
