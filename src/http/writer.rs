use anyhow::Context;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

/// Size of the blocks used when streaming a file body from disk.
pub const BLOCK_SIZE: usize = 1024;

/// Program identity sent in the `Server` header of every response.
pub const SERVER_SOFTWARE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Serializes the status line, the common header block and the
/// response-specific headers, through the blank line.
///
/// The common block has a fixed order on every response: `Date`, `Server`,
/// `Connection: close`. The status line is always `HTTP/1.0` regardless of
/// the minor version the client asked with.
fn serialize_head(response: &Response, date: &str) -> Vec<u8> {
    let mut buf = Vec::new();

    let status_line = format!(
        "HTTP/1.0 {} {}\r\n",
        response.status.as_u16(),
        response.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    buf.extend_from_slice(format!("Date: {date}\r\n").as_bytes());
    buf.extend_from_slice(format!("Server: {SERVER_SOFTWARE}\r\n").as_bytes());
    buf.extend_from_slice(b"Connection: close\r\n");

    for (name, value) in &response.headers {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Writes `response` to `stream`: head first, then the body unless
/// `suppress_body` is set (HEAD requests suppress every body, error pages
/// included).
///
/// File bodies are streamed in [`BLOCK_SIZE`] chunks. A read or write
/// failure mid-stream is fatal to the connection; the headers are already
/// on the wire by then, so there is no way to patch up the response.
pub async fn write_response<W>(
    stream: &mut W,
    response: &Response,
    suppress_body: bool,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let date = httpdate::fmt_http_date(SystemTime::now());
    stream
        .write_all(&serialize_head(response, &date))
        .await
        .context("failed to write response header")?;

    if !suppress_body {
        match &response.body {
            Body::Bytes(bytes) => stream
                .write_all(bytes)
                .await
                .context("failed to write response body")?,
            Body::File { path, .. } => stream_file(stream, path).await?,
        }
    }

    stream.flush().await.context("failed to flush response")?;
    Ok(())
}

/// Copies a file to the stream block by block, without buffering it whole.
async fn stream_file<W>(stream: &mut W, path: &Path) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut file = File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut block = [0u8; BLOCK_SIZE];
    loop {
        let n = file
            .read(&mut block)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        stream
            .write_all(&block[..n])
            .await
            .context("failed to write response body")?;
    }
    Ok(())
}
