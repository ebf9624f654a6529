//! Same-origin JSON pass-through to the backend API.
//!
//! Method, JSON body and `Authorization` header go upstream unchanged; the
//! upstream status and JSON body come back unchanged. A transport failure
//! becomes a 502 with a fixed error body.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;
use crate::upstream::{ADMINISTRATORS, PROJECTS, SUBMISSIONS};

/// Body to relay when the backend answered without a JSON body.
#[derive(Debug, Clone, Copy)]
enum Fallback {
    EmptyList,
    EmptyObject,
    Ok,
}

impl Fallback {
    fn body(self, status: StatusCode) -> Value {
        match self {
            Self::EmptyList => json!([]),
            Self::EmptyObject => json!({}),
            Self::Ok => json!({ "ok": status.is_success() }),
        }
    }
}

/// Missing or unparsable request bodies count as no body.
fn lenient_json(bytes: &Bytes) -> Option<Value> {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .filter(|v| !v.is_null())
}

async fn relay(
    state: &AppState,
    method: Method,
    segments: &[&str],
    headers: &HeaderMap,
    body: Option<Value>,
    fallback: Fallback,
) -> Response {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    match state
        .upstream
        .forward(method.clone(), segments, authorization, body.as_ref())
        .await
    {
        Ok(reply) => {
            let body = reply.body.unwrap_or_else(|| fallback.body(reply.status));
            (reply.status, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(%method, path = %segments.join("/"), error = %e, "Proxy request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("Proxy {} failed", method) })),
            )
                .into_response()
        }
    }
}

pub async fn list_administrators(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    relay(&state, Method::GET, &[ADMINISTRATORS], &headers, None, Fallback::EmptyList).await
}

pub async fn create_administrator(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(
        &state,
        Method::POST,
        &[ADMINISTRATORS],
        &headers,
        lenient_json(&body),
        Fallback::Ok,
    )
    .await
}

pub async fn administrator_login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let credentials = lenient_json(&body).unwrap_or_else(|| json!({}));
    relay(
        &state,
        Method::POST,
        &[ADMINISTRATORS, "login"],
        &headers,
        Some(credentials),
        Fallback::EmptyObject,
    )
    .await
}

pub async fn update_administrator(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(
        &state,
        Method::PUT,
        &[ADMINISTRATORS, id.as_str()],
        &headers,
        lenient_json(&body),
        Fallback::Ok,
    )
    .await
}

pub async fn delete_administrator(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    relay(&state, Method::DELETE, &[ADMINISTRATORS, id.as_str()], &headers, None, Fallback::Ok).await
}

pub async fn list_submissions(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    relay(&state, Method::GET, &[SUBMISSIONS], &headers, None, Fallback::EmptyList).await
}

pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payload = lenient_json(&body).unwrap_or_else(|| json!({}));
    relay(
        &state,
        Method::POST,
        &[SUBMISSIONS],
        &headers,
        Some(payload),
        Fallback::EmptyObject,
    )
    .await
}

pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    relay(&state, Method::DELETE, &[SUBMISSIONS, id.as_str()], &headers, None, Fallback::Ok).await
}

pub async fn update_submission_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(
        &state,
        Method::PATCH,
        &[SUBMISSIONS, id.as_str(), "status"],
        &headers,
        lenient_json(&body),
        Fallback::Ok,
    )
    .await
}

pub async fn list_projects(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    relay(&state, Method::GET, &[PROJECTS], &headers, None, Fallback::EmptyList).await
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(
        &state,
        Method::POST,
        &[PROJECTS],
        &headers,
        lenient_json(&body),
        Fallback::Ok,
    )
    .await
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay(
        &state,
        Method::PUT,
        &[PROJECTS, id.as_str()],
        &headers,
        lenient_json(&body),
        Fallback::Ok,
    )
    .await
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    relay(&state, Method::DELETE, &[PROJECTS, id.as_str()], &headers, None, Fallback::Ok).await
}
