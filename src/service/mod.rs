use serde_json::json;
use std::{error::Error, future::Future, sync::Arc, time::Instant};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use tracing::{info, warn};

use crate::{Config, Session, load_index};

mod lookup;
mod status;

/// Minimal response wrapper for handler results.
struct Response {
    status_code: u16,
    body: String,
}

impl Response {
    /// Construct a response with status code and serialized JSON body.
    fn new(status_code: u16, body: String) -> Self {
        Self { status_code, body }
    }
}

/// Start a polling station lookup HTTP server on the given address.
pub async fn serve(addr: &str, config: Config) -> Result<(), Box<dyn Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;

    serve_with_shutdown(listener, config, tokio::signal::ctrl_c()).await
}

/// Start the server with a shutdown future (e.g. Ctrl-C).
///
/// Connections are accepted immediately; the station data loads in the
/// background and lookups answer "not yet loaded" until it is ready.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    config: Config,
    shutdown: F,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    F: Future<Output = Result<(), std::io::Error>> + Send + 'static,
{
    let session = Arc::new(Session::new());

    let loader = session.clone();
    tokio::spawn(async move {
        let result = load_index(&config.data).await;
        loader.finish(result);
    });

    info!(addr = ?listener.local_addr().ok(), "accepting connections");

    let mut shutdown = Box::pin(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accept = listener.accept() => {
                let (stream, _) = accept?;
                let session = session.clone();
                tokio::spawn(async move {
                    let mut stream = stream;
                    if let Err(err) = handle_connection(&mut stream, session).await {
                        let _ = write_response(
                            &mut stream,
                            500,
                            &json_error(&err.to_string()),
                            None,
                        )
                        .await;
                    }
                });
            }
        }
    }

    Ok(())
}

/// Handle a single HTTP connection and route to the correct handler.
async fn handle_connection(
    stream: &mut tokio::net::TcpStream,
    session: Arc<Session>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let start = Instant::now();
    let mut buffer = [0u8; 255];
    let mut total_read = 0usize;

    while total_read < 255 {
        let read = stream.read(&mut buffer[total_read..]).await?;
        if read == 0 {
            break;
        }
        total_read += read;
        // detect end
        if buffer[..total_read].ends_with(b"\n") {
            break;
        }
    }

    let request = String::from_utf8_lossy(&buffer[..total_read]);

    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();

    info!(method, target, "received request");

    if method != "GET" {
        let response = Response::new(405, json_error("method not allowed"));
        let duration_ms = start.elapsed().as_millis();
        write_response(stream, response.status_code, &response.body, Some(duration_ms)).await?;
        return Ok(());
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let response = match path {
        "/status" => status::handle_status(&session),
        "/" | "/lookup" => lookup::handle_lookup(&session, query),
        _ => Response::new(404, json_error("not found")),
    };

    let duration_ms = start.elapsed().as_millis();
    write_response(stream, response.status_code, &response.body, Some(duration_ms)).await?;
    Ok(())
}

/// Write the HTTP response with JSON body and close the connection.
async fn write_response(
    stream: &mut tokio::net::TcpStream,
    status_code: u16,
    body: &str,
    duration_ms: Option<u128>,
) -> std::io::Result<()> {
    let status_text = match status_code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        503 => "Service Unavailable",
        _ => "Internal Server Error",
    };

    if status_code == 200 {
        info!(status_code, duration_ms = ?duration_ms, body, "request served");
    } else {
        warn!(status_code, duration_ms = ?duration_ms, body, "request failed");
    }

    let header = format!(
        "HTTP/1.1 {status_code} {status_text}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );

    stream.write_all(header.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.shutdown().await
}

/// JSON for an error response.
pub(crate) fn json_error(message: &str) -> String {
    json!({ "error": message }).to_string()
}
