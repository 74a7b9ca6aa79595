//! Response builders with the CORS headers every route answers with.

use lambda_http::http::{header::CONTENT_TYPE, StatusCode};
use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::json;
use tracing::error;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type,Authorization";

fn builder(status: StatusCode, allow_methods: &str) -> lambda_http::http::response::Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Access-Control-Allow-Methods", allow_methods)
}

fn fallback() -> Response<Body> {
    let mut response = Response::new(Body::Empty);
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// A JSON response with the given status.
pub fn json<T: Serialize>(status: StatusCode, allow_methods: &str, value: &T) -> Response<Body> {
    let body = match serde_json::to_string(value) {
        Ok(body) => body,
        Err(err) => {
            error!("failed to serialize response body: {err}");
            return fallback();
        }
    };
    builder(status, allow_methods)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::Text(body))
        .unwrap_or_else(|_| fallback())
}

/// An empty-bodied response, e.g. 204 on delete.
pub fn empty(status: StatusCode, allow_methods: &str) -> Response<Body> {
    builder(status, allow_methods)
        .body(Body::Empty)
        .unwrap_or_else(|_| fallback())
}

/// A `{"error": ...}` JSON response.
pub fn error(status: StatusCode, allow_methods: &str, message: &str) -> Response<Body> {
    json(status, allow_methods, &json!({ "error": message }))
}
