//! CORS middleware for the function endpoints
//!
//! Every response carries the same permissive header set the platform's
//! edge functions use, and preflight requests short-circuit before
//! routing with an empty 200.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, header},
    middleware::Next,
    response::Response,
};

/// Allowed origin sent on every response
pub const ALLOW_ORIGIN: &str = "*";

/// Allowed request headers sent on every response
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Insert the permissive CORS header set into `headers`
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// CORS middleware
///
/// OPTIONS requests are answered directly with an empty 200; all other
/// responses pass through with the CORS headers added.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}
