//! HTTP protocol implementation.
//!
//! One request and one response per connection; the connection is closed
//! after the response is written.
//!
//! # Architecture
//!
//! - **`status`**: Status codes, reason phrases and error pages
//! - **`parser`**: Reads and validates a request from a buffered stream
//! - **`request`**: The validated request and the implemented methods
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes responses, including chunked framing
//! - **`connection`**: Per-connection dispatch state machine
//! - **`error`**: Classified failures and their status codes
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Parse request line, headers, body
//!        └──────┬──────┘
//!               │ Request valid          malformed → 400
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Method check (501), file lookup (404),
//!        └──────┬───────────┘   file read (500), TRACE / params echo
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hearth::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let files = Arc::new(StaticFiles::new(&StaticFilesConfig::default()));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let files = files.clone();
//!         tokio::spawn(async move {
//!             let conn = Connection::new(socket, files, Duration::from_secs(5));
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;
