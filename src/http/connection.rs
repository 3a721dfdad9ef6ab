use anyhow::Context;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::ServerConfig;
use crate::http::handler;
use crate::http::parser;
use crate::http::writer;

/// Serves exactly one request on `stream`, then lets the connection drop.
///
/// Parse errors tear the connection down without sending anything; a
/// malformed request never earns a half-formed response. Dispatch outcomes
/// like 404/405/501 are normal responses, not errors, so the only `Err`
/// paths out of here are protocol violations and transport failures.
pub async fn serve(mut stream: TcpStream, config: &ServerConfig) -> anyhow::Result<()> {
    let (read_half, mut write_half) = stream.split();
    let mut input = BufReader::new(read_half);

    let request = parser::read_request(&mut input, config.max_request_body_length)
        .await
        .context("failed to read request")?;

    let response = handler::dispatch(&request, &config.document_root);
    debug!(
        method = %request.method,
        path = %request.path,
        status = response.status.as_u16(),
        "request dispatched"
    );

    writer::write_response(&mut write_half, &response, request.is_head())
        .await
        .context("failed to write response")?;

    Ok(())
}
