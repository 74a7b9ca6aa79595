use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use tracing::info;

use crate::config::Config;
use crate::handlers::{books, reading_lists};
use crate::response;
use crate::store::{BookStore, ReadingListStore};

/// Per-process state shared by every invocation.
pub struct AppState<S> {
    pub store: S,
    pub config: Config,
}

/// Dispatches a request to its handler and converts any fault into a
/// structured response. This is the outer boundary: nothing propagates past
/// it except as a response object.
pub async fn handle<S>(state: &AppState<S>, event: Request) -> Response<Body>
where
    S: BookStore + ReadingListStore,
{
    let method = event.method().as_str().to_string();
    let path = event.uri().path().to_string();
    info!("{method} {path}");

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["getBooks"]) => books::get_books(&state.store)
            .await
            .unwrap_or_else(|err| err.into_response(books::ALLOWED_METHODS)),
        ("GET", ["getBooks", id]) => books::get_book(&state.store, id)
            .await
            .unwrap_or_else(|err| err.into_response(books::ALLOWED_METHODS)),
        ("GET", ["reading-lists"]) => {
            reading_lists::list(&state.store, &state.config, event)
                .await
                .unwrap_or_else(|err| err.into_response(reading_lists::ALLOWED_METHODS))
        }
        ("POST", ["reading-lists"]) => {
            reading_lists::create(&state.store, &state.config, event)
                .await
                .unwrap_or_else(|err| err.into_response(reading_lists::ALLOWED_METHODS))
        }
        ("PUT", ["reading-lists", id]) => {
            reading_lists::update(&state.store, &state.config, id, event)
                .await
                .unwrap_or_else(|err| err.into_response(reading_lists::ALLOWED_METHODS))
        }
        ("DELETE", ["reading-lists", id]) => {
            reading_lists::delete(&state.store, &state.config, id, event)
                .await
                .unwrap_or_else(|err| err.into_response(reading_lists::ALLOWED_METHODS))
        }
        // The gateway answers preflight in deployment; answering here keeps
        // local invocations browser-friendly.
        ("OPTIONS", ["getBooks", ..]) => {
            response::empty(StatusCode::NO_CONTENT, books::ALLOWED_METHODS)
        }
        ("OPTIONS", _) => {
            response::empty(StatusCode::NO_CONTENT, reading_lists::ALLOWED_METHODS)
        }
        _ => response::error(
            StatusCode::NOT_FOUND,
            reading_lists::ALLOWED_METHODS,
            "not found",
        ),
    }
}
