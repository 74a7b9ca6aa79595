use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::model::{iso_now, ListUpdate, ReadingList};
use crate::response;
use crate::store::ReadingListStore;

pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    name: String,
    user_id: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    book_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest {
    #[serde(default)]
    name: String,
    user_id: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    book_ids: Vec<String>,
}

fn user_id_from_query(event: &Request, config: &Config) -> String {
    event
        .query_string_parameters()
        .first("userId")
        .map(str::to_string)
        .unwrap_or_else(|| config.default_user_id.clone())
}

/// POST /reading-lists — validate, stamp identity and timestamps, persist.
pub async fn create(
    store: &impl ReadingListStore,
    config: &Config,
    event: Request,
) -> Result<Response<Body>, ApiError> {
    let body = event.body();
    if body.as_ref().is_empty() {
        return Err(ApiError::validation("request body is required"));
    }

    let request: CreateRequest = serde_json::from_slice(body.as_ref())
        .map_err(|err| ApiError::validation(format!("invalid request body: {err}")))?;

    if request.name.trim().is_empty() {
        return Err(ApiError::validation("list name is required"));
    }

    let now = iso_now();
    let list = ReadingList {
        id: Uuid::new_v4().to_string(),
        user_id: request
            .user_id
            .unwrap_or_else(|| config.default_user_id.clone()),
        name: request.name,
        description: request.description,
        book_ids: request.book_ids,
        created_at: now.clone(),
        updated_at: now,
    };

    store.put_list(&list).await?;
    Ok(response::json(StatusCode::CREATED, ALLOWED_METHODS, &list))
}

/// GET /reading-lists — every list owned by the caller's user id. Always an
/// array, possibly empty.
pub async fn list(
    store: &impl ReadingListStore,
    config: &Config,
    event: Request,
) -> Result<Response<Body>, ApiError> {
    let user_id = user_id_from_query(&event, config);
    let lists = store.list_for_user(&user_id).await?;
    Ok(response::json(StatusCode::OK, ALLOWED_METHODS, &lists))
}

/// PUT /reading-lists/{id} — unconditional overwrite of the mutable fields.
/// A missing body behaves as `{}`.
pub async fn update(
    store: &impl ReadingListStore,
    config: &Config,
    id: &str,
    event: Request,
) -> Result<Response<Body>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::validation("list id is required in path"));
    }

    let body = event.body();
    let request: UpdateRequest = if body.as_ref().is_empty() {
        UpdateRequest::default()
    } else {
        serde_json::from_slice(body.as_ref())
            .map_err(|err| ApiError::validation(format!("invalid request body: {err}")))?
    };

    let user_id = request
        .user_id
        .unwrap_or_else(|| config.default_user_id.clone());
    let update = ListUpdate {
        name: request.name,
        description: request.description,
        book_ids: request.book_ids,
        updated_at: iso_now(),
    };

    let updated = store.update_list(id, &user_id, &update).await?;
    Ok(response::json(StatusCode::OK, ALLOWED_METHODS, &updated))
}

/// DELETE /reading-lists/{id} — delete by key, idempotent, 204.
pub async fn delete(
    store: &impl ReadingListStore,
    config: &Config,
    id: &str,
    event: Request,
) -> Result<Response<Body>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::validation("list id is required in path"));
    }

    let user_id = user_id_from_query(&event, config);
    store.delete_list(id, &user_id).await?;
    Ok(response::empty(StatusCode::NO_CONTENT, ALLOWED_METHODS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use lambda_http::http;
    use rstest::rstest;
    use serde_json::Value;
    use std::collections::HashMap;

    fn test_config() -> Config {
        Config {
            books_table: "books".to_string(),
            reading_lists_table: "reading-lists".to_string(),
            default_user_id: "1".to_string(),
        }
    }

    fn post(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/reading-lists")
            .body(Body::from(body))
            .unwrap()
    }

    fn empty_request() -> Request {
        http::Request::builder()
            .method("GET")
            .uri("/reading-lists")
            .body(Body::Empty)
            .unwrap()
    }

    fn with_user_query(user_id: &str) -> Request {
        empty_request().with_query_string_parameters(HashMap::from([(
            "userId".to_string(),
            vec![user_id.to_string()],
        )]))
    }

    #[tokio::test]
    async fn create_stamps_identity_and_defaults() {
        let store = MemoryStore::new();
        let response = create(&store, &test_config(), post(r#"{"name":"Sci-Fi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert_eq!(body["userId"], "1");
        assert_eq!(body["name"], "Sci-Fi");
        assert_eq!(body["description"], "");
        assert_eq!(body["bookIds"], Value::Array(vec![]));
        assert_eq!(body["createdAt"], body["updatedAt"]);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn create_honors_submitted_fields() {
        let store = MemoryStore::new();
        let response = create(
            &store,
            &test_config(),
            post(r#"{"name":"History","userId":"7","description":"d","bookIds":["b-1","b-2"]}"#),
        )
        .await
        .unwrap();

        let body: Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body["userId"], "7");
        assert_eq!(body["description"], "d");
        assert_eq!(body["bookIds"][1], "b-2");
    }

    #[rstest]
    #[case::empty_name(r#"{"name":""}"#)]
    #[case::whitespace_name(r#"{"name":"   "}"#)]
    #[case::missing_name(r#"{"description":"d"}"#)]
    #[case::not_json("not json")]
    #[tokio::test]
    async fn create_rejects_bad_bodies_before_storage(#[case] body: &str) {
        let store = MemoryStore::new();
        let err = create(&store, &test_config(), post(body)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn create_rejects_missing_body() {
        let store = MemoryStore::new();
        let event = http::Request::builder()
            .method("POST")
            .uri("/reading-lists")
            .body(Body::Empty)
            .unwrap();
        let err = create(&store, &test_config(), event).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn list_returns_empty_array_not_404() {
        let store = MemoryStore::new();
        let response = list(&store, &test_config(), empty_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"[]");
    }

    #[tokio::test]
    async fn list_filters_by_user_id() {
        let store = MemoryStore::new();
        let config = test_config();
        create(&store, &config, post(r#"{"name":"Mine","userId":"7"}"#))
            .await
            .unwrap();
        create(&store, &config, post(r#"{"name":"Theirs","userId":"8"}"#))
            .await
            .unwrap();

        let response = list(&store, &config, with_user_query("7")).await.unwrap();
        let body: Vec<Value> = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["name"], "Mine");
    }

    #[tokio::test]
    async fn update_echoes_fields_and_refreshes_timestamp() {
        let store = MemoryStore::new();
        let config = test_config();
        let created = create(&store, &config, post(r#"{"name":"Old"}"#))
            .await
            .unwrap();
        let created: Value = serde_json::from_slice(created.body().as_ref()).unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let event = http::Request::builder()
            .method("PUT")
            .uri(format!("/reading-lists/{id}"))
            .body(Body::from(
                r#"{"name":"New","description":"fresh","bookIds":["b-9"]}"#,
            ))
            .unwrap();
        let response = update(&store, &config, &id, event).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body["name"], "New");
        assert_eq!(body["description"], "fresh");
        assert_eq!(body["bookIds"][0], "b-9");
        assert!(
            body["updatedAt"].as_str().unwrap() >= created["updatedAt"].as_str().unwrap()
        );
    }

    #[tokio::test]
    async fn update_missing_key_upserts_sparse_record() {
        let store = MemoryStore::new();
        let event = http::Request::builder()
            .method("PUT")
            .uri("/reading-lists/ghost")
            .body(Body::from(r#"{"name":"Ghost"}"#))
            .unwrap();

        let response = update(&store, &test_config(), "ghost", event)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body["name"], "Ghost");
        assert_eq!(body["createdAt"], "");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let config = test_config();
        create(&store, &config, post(r#"{"name":"Doomed"}"#))
            .await
            .unwrap();
        let id = {
            let lists = store.lists.lock().unwrap();
            lists.keys().next().unwrap().0.clone()
        };

        for _ in 0..2 {
            let event = http::Request::builder()
                .method("DELETE")
                .uri(format!("/reading-lists/{id}"))
                .body(Body::Empty)
                .unwrap();
            let response = delete(&store, &config, &id, event).await.unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            assert!(response.body().as_ref().is_empty());
        }
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() {
        let store = MemoryStore::failing();
        let err = create(&store, &test_config(), post(r#"{"name":"x"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
