//! Request id generation and header masking
//!
//! Every request gets an `x-request-id` (kept if the client sent one), the id
//! is echoed on the response along with any client `x-correlation-id`, and
//! credential headers are marked sensitive so the trace layer never prints them.

use http::HeaderName;
use tower_http::{
    propagate_header::PropagateHeaderLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::ids::MakeBookshelfRequestId;

/// Client-supplied correlation header echoed on the response
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Headers masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
];

/// Assign a `req_<uuidv7>` id to requests that arrive without one
///
/// Example format: `req_0192a4c1e1d07c52b1f3c9a2d4e5f601`
pub fn request_id_layer() -> SetRequestIdLayer<MakeBookshelfRequestId> {
    SetRequestIdLayer::x_request_id(MakeBookshelfRequestId)
}

/// Copy `x-request-id` from the request onto the response
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Copy [`CORRELATION_ID_HEADER`] from the request onto the response
pub fn correlation_id_propagation_layer() -> PropagateHeaderLayer {
    PropagateHeaderLayer::new(HeaderName::from_static(CORRELATION_ID_HEADER))
}

/// Mark [`SENSITIVE_HEADERS`] as sensitive
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    let headers = SENSITIVE_HEADERS
        .iter()
        .filter_map(|h| h.parse::<HeaderName>().ok())
        .collect::<Vec<_>>();

    SetSensitiveRequestHeadersLayer::new(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(correlation_id_propagation_layer())
            .layer(request_id_propagation_layer())
            .layer(request_id_layer())
    }

    #[test]
    fn test_header_constants_parse() {
        for name in SENSITIVE_HEADERS.iter().chain([&CORRELATION_ID_HEADER]) {
            assert!(name.parse::<HeaderName>().is_ok(), "{}", name);
        }
        assert!(SENSITIVE_HEADERS.contains(&"authorization"));
    }

    #[tokio::test]
    async fn test_generated_request_id_is_returned() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers()["x-request-id"].to_str().unwrap();
        assert!(id.starts_with("req_"));
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let response = app()
            .oneshot(
                Request::get("/")
                    .header("x-request-id", "trace-me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "trace-me");
    }

    #[tokio::test]
    async fn test_correlation_id_is_echoed() {
        let response = app()
            .oneshot(
                Request::get("/")
                    .header(CORRELATION_ID_HEADER, "order-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[CORRELATION_ID_HEADER], "order-42");
        assert!(response.headers()["x-request-id"].to_str().unwrap().starts_with("req_"));
    }

    #[tokio::test]
    async fn test_correlation_id_is_not_invented() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(!response.headers().contains_key(CORRELATION_ID_HEADER));
    }
}
