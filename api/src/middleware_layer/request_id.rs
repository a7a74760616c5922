use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Id supplied by the client, if it is a non-blank visible string.
pub fn incoming_request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(&REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}

fn generate_request_id() -> HeaderValue {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    HeaderValue::from_str(&format!("req-{nanos}"))
        .unwrap_or_else(|_| HeaderValue::from_static("req-unknown"))
}

/// Guarantees an `X-Request-Id` on the request seen by handlers and echoes it
/// on the response.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let incoming = incoming_request_id(req.headers()).and_then(|v| HeaderValue::from_str(v).ok());
    let id = match incoming {
        Some(id) => id,
        None => {
            let generated = generate_request_id();
            req.headers_mut().insert(REQUEST_ID, generated.clone());
            generated
        }
    };

    let mut res = next.run(req).await;
    res.headers_mut().insert(REQUEST_ID, id);
    res
}
