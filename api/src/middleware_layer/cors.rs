use axum::{
    body::Body,
    http::{
        HeaderMap, HeaderValue, Method, Request, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
            ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN, VARY,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

fn any() -> HeaderValue {
    HeaderValue::from_static("*")
}

/// Allow-any-origin CORS. A concrete `Origin` is echoed back so credentialed
/// browser requests are accepted too.
pub async fn permissive_cors(req: Request<Body>, next: Next) -> Response {
    let origin = req.headers().get(ORIGIN).cloned();

    if req.method() == Method::OPTIONS && req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
    {
        let mut res = StatusCode::NO_CONTENT.into_response();
        let headers = res.headers_mut();
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            req.headers()
                .get(ACCESS_CONTROL_REQUEST_METHOD)
                .cloned()
                .unwrap_or_else(any),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            req.headers()
                .get(ACCESS_CONTROL_REQUEST_HEADERS)
                .cloned()
                .unwrap_or_else(any),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("600"));
        allow_origin(headers, origin);
        return res;
    }

    let mut res = next.run(req).await;
    allow_origin(res.headers_mut(), origin);
    res
}

fn allow_origin(headers: &mut HeaderMap, origin: Option<HeaderValue>) {
    match origin {
        Some(origin) => {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
            headers.append(VARY, HeaderValue::from_static("origin"));
        }
        None => {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, any());
        }
    }
}
