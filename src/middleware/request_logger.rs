use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Tags every request with an id and logs method, path, status and
/// latency on the way out.
pub async fn request_logger_middleware(mut req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    if let Ok(value) = request_id.parse() {
        req.headers_mut().insert("x-request-id", value);
    }

    let response = next.run(req).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
