use std::path::PathBuf;

use thiserror::Error;

use crate::http::parser::ParseError;
use crate::http::status::StatusCode;

/// Classified failure raised while handling a request.
///
/// The dispatcher switches on the variant to choose the status code; the
/// variant's message is only logged, never sent to the client.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("malformed request: {0}")]
    BadRequest(#[source] ParseError),
    #[error("method {0} is not implemented")]
    NotImplemented(String),
    #[error("nothing to serve at {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Internal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BadRequest,
            HttpError::NotImplemented(_) => StatusCode::NotImplemented,
            HttpError::NotFound(_) => StatusCode::NotFound,
            HttpError::Internal { .. } => StatusCode::InternalServerError,
        }
    }
}
