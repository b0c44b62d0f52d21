//! Logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{error, info, warn};

/// Request logging middleware. Server errors log at `error`, client errors
/// at `warn`, everything else at `info`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match status {
        500.. => error!(%method, %path, status, %duration_ms, "Request failed"),
        // Unknown ids are routine on this API
        404 => info!(%method, %path, status, %duration_ms, "Request completed"),
        400..=499 => warn!(%method, %path, status, %duration_ms, "Request rejected"),
        _ => info!(%method, %path, status, %duration_ms, "Request completed"),
    }

    response
}
