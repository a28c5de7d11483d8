//! JSON HTTP API served by `deck serve`.
//!
//! `tiny_http` accepts connections on a blocking worker thread; each request
//! is handed back to the tokio runtime for the async handler.

pub mod error;
pub mod handlers;
pub mod request;
pub mod routes;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Handle;

pub use handlers::ApiState;

use handlers::ApiResponse;
use request::{ApiRequest, Method};

/// Request bodies larger than this are truncated.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Serve the API on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the worker panics.
pub async fn run(addr: &str, state: ApiState) -> anyhow::Result<()> {
    let server = tiny_http::Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    let server = Arc::new(server);
    tracing::info!(%addr, "taskdeck API listening");

    let runtime = Handle::current();
    let worker_server = Arc::clone(&server);
    let mut worker =
        tokio::task::spawn_blocking(move || serve_blocking(&worker_server, &state, &runtime));

    tokio::select! {
        joined = &mut worker => {
            joined.context("server worker panicked")?;
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(error) = signal {
                tracing::warn!(%error, "failed to listen for Ctrl-C");
            }
            tracing::info!("shutting down");
            server.unblock();
            worker.await.context("server worker panicked")?;
        }
    }
    Ok(())
}

fn serve_blocking(server: &tiny_http::Server, state: &ApiState, runtime: &Handle) {
    for mut incoming in server.incoming_requests() {
        let request = read_request(&mut incoming);
        let response = runtime.block_on(handlers::handle(state, &request));
        tracing::info!(
            method = %incoming.method(),
            path = %request.path,
            status = response.status,
            "request"
        );
        if let Err(error) = respond(incoming, response) {
            tracing::warn!(%error, "failed to write response");
        }
    }
}

fn read_request(incoming: &mut tiny_http::Request) -> ApiRequest {
    let method = Method::from_name(incoming.method().as_str());
    let mut request = ApiRequest::new(method, incoming.url());

    if let Some(header) = incoming
        .headers()
        .iter()
        .find(|h| h.field.equiv("Authorization"))
    {
        request = request.with_authorization(header.value.as_str());
    }

    let mut body = String::new();
    if let Err(error) = incoming
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
    {
        tracing::warn!(%error, "failed to read request body");
        body.clear();
    }
    request.with_body(body)
}

fn respond(incoming: tiny_http::Request, response: ApiResponse) -> std::io::Result<()> {
    let mut headers = Vec::with_capacity(2);
    if response.body.is_some() {
        headers.push(("Content-Type", "application/json"));
    }
    if let Some(allow) = response.allow {
        headers.push(("Allow", allow));
    }

    let mut reply = tiny_http::Response::from_string(response.body.unwrap_or_default())
        .with_status_code(response.status);
    for (name, value) in headers {
        match tiny_http::Header::from_bytes(name, value) {
            Ok(header) => reply = reply.with_header(header),
            Err(()) => tracing::warn!(name, "invalid response header"),
        }
    }
    incoming.respond(reply)
}
