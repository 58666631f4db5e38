use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::http::error::HttpError;
use crate::http::mime::ContentType;
use crate::http::parser::read_request;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::static_files::StaticFiles;

const NO_PARAMS_NOTICE: &str = "\n<p>No parameter values were submitted.</p>\n";

/// Handles exactly one request on one client stream.
pub struct Connection<S> {
    stream: BufReader<S>,
    files: Arc<StaticFiles>,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, files: Arc<StaticFiles>, read_timeout: Duration) -> Self {
        Self {
            stream: BufReader::new(stream),
            files,
            read_timeout,
            state: ConnectionState::Reading,
        }
    }

    /// Reads one request, sends one response, then closes the stream.
    ///
    /// The stream is shut down on every path. An error is returned only for
    /// transport failures, when no response could be delivered.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.serve().await;

        if let Err(e) = self.stream.shutdown().await {
            warn!(error = %e, "Failed to close client connection");
        }

        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => {
                    match read_request(&mut self.stream, self.read_timeout).await {
                        Ok(req) => {
                            debug!(raw = %String::from_utf8_lossy(&req.raw), "HTTP request");
                            ConnectionState::Processing(req)
                        }

                        Err(e) if e.is_transport() => {
                            return Err(anyhow::Error::new(e).context("reading request"));
                        }

                        Err(e) => {
                            warn!(error = %HttpError::BadRequest(e), "Rejected request");
                            Self::writing(Response::bad_request())
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = self.dispatch(&req).await;
                    info!(
                        method = %req.method,
                        path = %req.path,
                        host = req.header("Host").unwrap_or("-"),
                        user_agent = req.header("User-Agent").unwrap_or("-"),
                        status = response.status.as_u16(),
                        "Request handled"
                    );
                    Self::writing(response)
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    fn writing(response: Response) -> ConnectionState {
        debug!(
            status = response.status.as_u16(),
            headers = ?response.headers,
            "Response headers"
        );
        ConnectionState::Writing(ResponseWriter::new(&response))
    }

    async fn dispatch(&self, req: &Request) -> Response {
        match self.respond(req).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    error = %e,
                    method = %req.method,
                    path = %req.path,
                    "Request failed"
                );
                Response::error_builder(e.status())
                    .head_only(req.method() == Some(Method::HEAD))
                    .build()
            }
        }
    }

    async fn respond(&self, req: &Request) -> Result<Response, HttpError> {
        let method = req
            .method()
            .ok_or_else(|| HttpError::NotImplemented(req.method.clone()))?;

        let path = self.files.resolve(&req.path);
        let builder = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", ContentType::from_path(&path).as_str())
            .head_only(method == Method::HEAD)
            .chunked(req.chunked);

        if method == Method::TRACE {
            return Ok(builder.body(req.raw.clone()).build());
        }

        let contents = self.files.read(&path).await?;

        let body = if method == Method::POST && self.files.is_params_page(&req.path) {
            render_params_page(contents, req)
        } else {
            contents
        };

        Ok(builder.body(body).build())
    }
}

/// Appends the non-empty request parameters to the page, or a notice when
/// there are none.
fn render_params_page(mut page: Vec<u8>, req: &Request) -> Vec<u8> {
    if !req.has_param_values() {
        page.extend_from_slice(NO_PARAMS_NOTICE.as_bytes());
        return page;
    }

    page.extend_from_slice(b"\n<h2>Submitted parameters</h2>\n<ul>\n");
    for (name, value) in req.filled_params() {
        let entry = format!("<li>{}={}</li>\n", escape_html(name), escape_html(value));
        page.extend_from_slice(entry.as_bytes());
    }
    page.extend_from_slice(b"</ul>\n");
    page
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
