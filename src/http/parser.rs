use crate::http::request::Request;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio::time::timeout;

/// Upper bound on the header block, request line included.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

/// Upper bound on a declared request body.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

const CRLF: &str = "\r\n";

/// Why a request could not be read.
///
/// Every variant except [`ParseError::Io`] is a malformed request and is
/// answered with 400 Bad Request. `Io` means the transport itself failed
/// and no response can be delivered.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty request")]
    Empty,
    #[error("invalid request line: {0}")]
    InvalidRequestLine(String),
    #[error("invalid header line: {0}")]
    InvalidHeader(String),
    #[error("Content-Length is not a non-negative integer: {0}")]
    InvalidContentLength(String),
    #[error("request is missing the final CRLF")]
    MissingTerminator,
    #[error("request of type {0} cannot have a body")]
    BodyNotAllowed(String),
    #[error("no body bytes arrived for a declared Content-Length of {0}")]
    MissingBody(usize),
    #[error("header block exceeds {0} bytes")]
    HeadTooLarge(usize),
    #[error("declared body of {0} bytes is too large")]
    BodyTooLarge(usize),
    #[error("header block is not valid UTF-8")]
    InvalidEncoding,
    #[error("timed out waiting for the header block")]
    Timeout,
    #[error("I/O error reading request: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// True when the failure came from the transport rather than the request bytes.
    pub fn is_transport(&self) -> bool {
        matches!(self, ParseError::Io(_))
    }
}

/// Reads and validates one request from `reader`.
///
/// Lines are read up to the blank line ending the header block, then the
/// request line and headers are validated, then a declared body is read.
/// Every individual read is bounded by `read_timeout`.
pub async fn read_request<R>(
    reader: &mut R,
    read_timeout: Duration,
) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut raw = Vec::with_capacity(1024);
    let mut lines: Vec<String> = Vec::new();

    loop {
        let mut line = Vec::new();
        let remaining = MAX_HEAD_BYTES.saturating_sub(raw.len()) + 1;
        let mut limited = (&mut *reader).take(remaining as u64);

        let n = timeout(read_timeout, limited.read_until(b'\n', &mut line))
            .await
            .map_err(|_| ParseError::Timeout)??;

        if n == 0 {
            return Err(if raw.is_empty() {
                ParseError::Empty
            } else {
                ParseError::MissingTerminator
            });
        }

        raw.extend_from_slice(&line);
        if raw.len() > MAX_HEAD_BYTES {
            return Err(ParseError::HeadTooLarge(MAX_HEAD_BYTES));
        }
        if !line.ends_with(b"\n") {
            return Err(ParseError::MissingTerminator);
        }

        let text = trim_line_ending(&line);
        if text.is_empty() {
            if lines.is_empty() {
                return Err(ParseError::Empty);
            }
            break;
        }

        let text = std::str::from_utf8(text).map_err(|_| ParseError::InvalidEncoding)?;
        lines.push(text.to_string());
    }

    let (method, target, version) = parse_request_line(&lines[0])?;

    let mut headers = HashMap::new();
    let mut content_length = 0;
    let mut chunked = false;

    for line in &lines[1..] {
        let (name, value) = parse_header_line(line)?;

        if name.eq_ignore_ascii_case("content-length") {
            content_length = parse_content_length(value)?;
        } else if name.eq_ignore_ascii_case("chunked") {
            chunked = value.eq_ignore_ascii_case("yes");
        }

        headers.insert(name.to_string(), value.to_string());
    }

    let bodyless = method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("HEAD");
    if content_length > 0 && bodyless {
        return Err(ParseError::BodyNotAllowed(method));
    }
    if content_length > MAX_BODY_BYTES {
        return Err(ParseError::BodyTooLarge(content_length));
    }

    let body = read_body(reader, content_length, read_timeout).await?;
    raw.extend_from_slice(&body);

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target.as_str(), None),
    };

    let mut params = BTreeMap::new();
    if let Some(query) = query {
        parse_params(query, &mut params);
    }
    if method.eq_ignore_ascii_case("POST") && !body.is_empty() {
        let form = String::from_utf8_lossy(&body);
        parse_params(form.lines().next().unwrap_or_default(), &mut params);
    }

    let raw_headers = lines.iter().map(|l| format!("{l}{CRLF}")).collect();

    Ok(Request {
        path: strip_traversal(path),
        method,
        version,
        params,
        content_length,
        chunked,
        headers,
        raw_headers,
        raw,
        body,
    })
}

/// Reads up to `declared` body bytes, keeping whatever prefix arrives
/// before end of stream or a read timeout.
///
/// Only a body of which not a single byte arrived is rejected.
async fn read_body<R>(
    reader: &mut R,
    declared: usize,
    read_timeout: Duration,
) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut body = vec![0; declared];
    let mut filled = 0;

    while filled < declared {
        match timeout(read_timeout, reader.read(&mut body[filled..])).await {
            Err(_) | Ok(Ok(0)) => break,
            Ok(Ok(n)) => filled += n,
            Ok(Err(e)) => return Err(e.into()),
        }
    }

    if declared > 0 && filled == 0 {
        return Err(ParseError::MissingBody(declared));
    }

    body.truncate(filled);
    Ok(body)
}

/// Splits a request line into method, target and version.
///
/// The line must look like `<token> /<path> HTTP/1.<0|1>`; runs of
/// whitespace between the parts are tolerated, at either end they are not.
pub fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
    let invalid = || ParseError::InvalidRequestLine(line.to_string());

    if line.trim() != line {
        return Err(invalid());
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(invalid());
    };

    if !is_token(method) || !target.starts_with('/') {
        return Err(invalid());
    }
    if !matches!(*version, "HTTP/1.0" | "HTTP/1.1") {
        return Err(invalid());
    }

    Ok((method.to_string(), target.to_string(), version.to_string()))
}

/// Splits a `Name: value` header line.
///
/// The name is letters, digits and hyphens; the value is everything after
/// the first `": "` and must not be empty. The value is not trimmed.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let invalid = || ParseError::InvalidHeader(line.to_string());

    let (name, value) = line.split_once(": ").ok_or_else(invalid)?;

    let valid_name = !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if !valid_name || value.is_empty() {
        return Err(invalid());
    }

    Ok((name, value))
}

pub fn parse_content_length(value: &str) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidContentLength(value.to_string());

    let declared: i64 = value.parse().map_err(|_| invalid())?;
    usize::try_from(declared).map_err(|_| invalid())
}

/// Adds `name=value` pairs separated by `&` to `params`.
///
/// A pair without `=` gets an empty value; a repeated name overwrites the
/// earlier value.
pub fn parse_params(input: &str, params: &mut BTreeMap<String, String>) {
    for pair in input.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(name.to_string(), value.to_string());
    }
}

/// Deletes every `../` from a request path until none is left.
pub fn strip_traversal(path: &str) -> String {
    let mut path = path.to_string();
    while path.contains("../") {
        path = path.replace("../", "");
    }
    path
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
