/// HTTP status codes the server can produce.
///
/// - `Ok` (200): File served
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): No file at the resolved path
/// - `InternalServerError` (500): Unexpected failure while serving
/// - `NotImplemented` (501): Method outside GET/POST/HEAD/TRACE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Looks up a catalog entry by its numeric code.
    ///
    /// ```
    /// # use hearth::http::status::StatusCode;
    /// assert_eq!(StatusCode::from_u16(404), Some(StatusCode::NotFound));
    /// assert_eq!(StatusCode::from_u16(418), None);
    /// ```
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            400 => Some(StatusCode::BadRequest),
            404 => Some(StatusCode::NotFound),
            500 => Some(StatusCode::InternalServerError),
            501 => Some(StatusCode::NotImplemented),
            _ => None,
        }
    }

    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use hearth::http::status::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    /// The fixed HTML body sent with an error status, `None` for 200.
    ///
    /// ```
    /// # use hearth::http::status::StatusCode;
    /// assert_eq!(
    ///     StatusCode::NotFound.error_page().as_deref(),
    ///     Some("<html><body><h1>404 Not Found</h1></body></html>")
    /// );
    /// ```
    pub fn error_page(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }

        Some(format!(
            "<html><body><h1>{} {}</h1></body></html>",
            self.as_u16(),
            self.reason_phrase()
        ))
    }
}

/// Reason phrase for an arbitrary numeric code.
pub fn reason_phrase(code: u16) -> &'static str {
    StatusCode::from_u16(code)
        .map(|s| s.reason_phrase())
        .unwrap_or("Unknown Status")
}
