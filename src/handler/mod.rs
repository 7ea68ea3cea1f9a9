//! HTTP request handling.
//!
//! [`handle_request`] is the hyper service entry point: it enforces the
//! body-size cap, buffers the request body, dispatches on the route table,
//! and writes the access log line. [`dispatch`] holds the routing logic
//! itself and works on a buffered body, which keeps it directly testable.

pub mod pages;
pub mod router;
pub mod static_files;

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::{BodyExt, Full};
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use router::{PageAction, RouteMatch};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_label(req.version());

    // 1. Reject oversized bodies before buffering them
    let response = if body_too_large(&req, state.config.http.max_body_size) {
        http::build_413_response()
    } else {
        // 2. Buffer the body, then route
        match req.into_body().collect().await {
            Ok(collected) => dispatch(&method, &path, collected.to_bytes(), &state).await,
            Err(e) => http::build_400_response(&format!("failed to read request body: {e}")),
        }
    };

    // 3. Access log
    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path,
        );
        entry.query = query;
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route a buffered request to its handler
pub async fn dispatch(
    method: &Method,
    path: &str,
    body: Bytes,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match router::match_path(path) {
        // The root redirect applies to any method, query or not.
        RouteMatch::Root => {
            http::build_redirect_response(&format!("/view/{}", state.config.wiki.front_page))
        }
        RouteMatch::Page { action, title } => match action {
            PageAction::View => pages::view(state, title).await,
            PageAction::Edit => pages::edit(state, title).await,
            PageAction::Save => {
                if method == Method::POST {
                    pages::save(state, title, &body).await
                } else {
                    http::build_405_response("POST")
                }
            }
        },
        RouteMatch::Static { rest } => static_files::serve(state, rest).await,
        RouteMatch::NotFound => http::build_404_response(),
    }
}

/// Validate the Content-Length header against the configured cap
fn body_too_large(req: &Request<Incoming>, max_body_size: u64) -> bool {
    req.headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .is_some_and(|size| size > max_body_size)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
