use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Largest payload carried by a single chunk.
pub const CHUNK_SIZE: usize = 500;

/// Serializes the status line, headers and (unless suppressed) the body.
pub fn serialize_response(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(256 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    if resp.head_only {
        return buf;
    }

    if resp.chunked {
        encode_chunked(&resp.body, &mut buf);
    } else {
        buf.put_slice(&resp.body);
    }

    buf
}

/// Appends `body` as chunked frames of at most [`CHUNK_SIZE`] bytes,
/// followed by the terminating zero-length chunk.
pub fn encode_chunked(body: &[u8], buf: &mut BytesMut) {
    for chunk in body.chunks(CHUNK_SIZE) {
        buf.put_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        buf.put_slice(chunk);
        buf.put_slice(b"\r\n");
    }
    buf.put_slice(b"0\r\n\r\n");
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response).freeze(),
            written: 0,
        }
    }

    /// Writes the whole response and flushes. A failed write is returned
    /// as is; nothing is retried.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
