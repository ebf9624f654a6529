//! Shared helpers: an in-process fake of the backend API and a test server
//! wired to it.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use axum_test::TestServer;
use portfolio::{router, AppState, Config};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const VALID_TOKEN: &str = "tok-123";
pub const REVOKED_TOKEN: &str = "tok-revoked";
pub const FAR_FUTURE: &str = "2999-01-01T00:00:00.000Z";

/// Passwords the fake login understands.
pub const GOOD_PASSWORD: &str = "senha123";
pub const REVOKED_PASSWORD: &str = "revogada";
pub const EXPIRED_PASSWORD: &str = "expirada";

#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub submissions: Vec<Value>,
    pub projects: Vec<Value>,
    pub administrators: Vec<Value>,
    pub calls: Vec<Call>,
    pub fail_projects: bool,
    next_id: u32,
}

impl Backend {
    pub fn with_submissions(ids_and_status: &[(&str, &str)]) -> Self {
        Self {
            submissions: ids_and_status
                .iter()
                .map(|(id, status)| {
                    json!({
                        "_id": id,
                        "name": format!("Cliente {}", id),
                        "email": format!("{}@cliente.com", id),
                        "description": format!("Mensagem de {}", id),
                        "status": status,
                        "createdAt": "2024-05-01T12:30:00.000Z"
                    })
                })
                .collect(),
            ..Default::default()
        }
    }

    /// A backend whose project listing answers 500.
    pub fn failing_projects() -> Self {
        Self {
            fail_projects: true,
            ..Default::default()
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-new-{}", prefix, self.next_id)
    }
}

pub type SharedBackend = Arc<Mutex<Backend>>;

pub fn calls_matching(backend: &SharedBackend, method: &str, path: &str) -> Vec<Call> {
    backend
        .lock()
        .unwrap()
        .calls
        .iter()
        .filter(|c| c.method == method && c.path == path)
        .cloned()
        .collect()
}

fn json_reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    json_reply(StatusCode::UNAUTHORIZED, json!({ "message": "Token inválido" }))
}

fn remove_by_id(list: &mut Vec<Value>, id: &str) -> bool {
    let before = list.len();
    list.retain(|item| item["_id"] != id);
    list.len() != before
}

async fn handle(
    State(shared): State<SharedBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let path = uri.path().to_string();

    let mut backend = shared.lock().unwrap();
    backend.calls.push(Call {
        method: method.as_str().to_string(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let authed = authorization.as_deref() == Some(format!("Bearer {}", VALID_TOKEN).as_str());
    let segments: Vec<&str> = path.trim_start_matches("/api/").split('/').collect();
    let payload = body.unwrap_or(Value::Null);

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["adm", "login"]) => {
            let (token, expires_in) = match payload["password"].as_str() {
                Some(GOOD_PASSWORD) => (VALID_TOKEN, FAR_FUTURE),
                Some(REVOKED_PASSWORD) => (REVOKED_TOKEN, FAR_FUTURE),
                Some(EXPIRED_PASSWORD) => (VALID_TOKEN, "2000-01-01T00:00:00.000Z"),
                _ => {
                    return json_reply(
                        StatusCode::UNAUTHORIZED,
                        json!({ "message": "Credenciais inválidas" }),
                    )
                }
            };
            json_reply(StatusCode::OK, json!({ "token": token, "expiresIn": expires_in }))
        }

        ("POST", ["users"]) => {
            let email = payload["email"].as_str().unwrap_or_default().to_string();
            if !email.is_empty() && backend.submissions.iter().any(|s| s["email"] == email) {
                return json_reply(StatusCode::CONFLICT, json!({ "message": "Email já cadastrado" }));
            }
            let id = backend.fresh_id("sub");
            let mut record = payload.clone();
            record["_id"] = json!(id);
            record["status"] = json!("novo");
            backend.submissions.push(record.clone());
            json_reply(StatusCode::CREATED, record)
        }
        ("GET", ["projects"]) if backend.fail_projects => json_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "database offline" }),
        ),
        ("GET", ["projects"]) => json_reply(StatusCode::OK, json!(backend.projects)),

        _ if !authed => unauthorized(),

        ("GET", ["users"]) => json_reply(StatusCode::OK, json!(backend.submissions)),
        ("DELETE", ["users", id]) => {
            if remove_by_id(&mut backend.submissions, id) {
                json_reply(StatusCode::OK, json!({ "message": "Removido" }))
            } else {
                json_reply(StatusCode::NOT_FOUND, json!({ "message": "Não encontrado" }))
            }
        }
        ("PATCH", ["users", id, "status"]) => {
            let status = payload["status"].clone();
            match backend.submissions.iter_mut().find(|s| s["_id"] == *id) {
                Some(record) => {
                    record["status"] = status;
                    json_reply(StatusCode::OK, record.clone())
                }
                None => json_reply(StatusCode::NOT_FOUND, json!({ "message": "Não encontrado" })),
            }
        }

        ("POST", ["projects"]) => {
            let id = backend.fresh_id("proj");
            let mut record = payload.clone();
            record["_id"] = json!(id);
            backend.projects.insert(0, record.clone());
            json_reply(StatusCode::CREATED, record)
        }
        ("PUT", ["projects", id]) => {
            match backend.projects.iter_mut().find(|p| p["_id"] == *id) {
                Some(record) => {
                    for key in ["name", "description", "isPreview", "link"] {
                        record[key] = payload[key].clone();
                    }
                    json_reply(StatusCode::OK, record.clone())
                }
                None => json_reply(StatusCode::NOT_FOUND, json!({ "message": "Não encontrado" })),
            }
        }
        ("DELETE", ["projects", id]) => {
            remove_by_id(&mut backend.projects, id);
            json_reply(StatusCode::OK, json!({ "message": "Removido" }))
        }

        ("GET", ["adm"]) => json_reply(StatusCode::OK, json!(backend.administrators)),
        ("POST", ["adm"]) => {
            let id = backend.fresh_id("adm");
            let record = json!({ "_id": id, "email": payload["email"] });
            backend.administrators.push(record.clone());
            json_reply(StatusCode::CREATED, json!({ "id": id, "email": payload["email"] }))
        }
        ("PUT", ["adm", id]) => {
            if let Some(record) = backend.administrators.iter_mut().find(|a| a["_id"] == *id) {
                if let Some(email) = payload.get("email") {
                    record["email"] = email.clone();
                }
            }
            json_reply(StatusCode::OK, json!({ "message": "Atualizado" }))
        }
        // Empty body on purpose: the proxy must fill in `{ "ok": true }`.
        ("DELETE", ["adm", id]) => {
            remove_by_id(&mut backend.administrators, id);
            StatusCode::OK.into_response()
        }

        _ => json_reply(StatusCode::NOT_FOUND, json!({ "message": "Rota inexistente" })),
    }
}

/// Starts the fake backend on a random local port. Returns its base URL
/// (without `/api`) and a handle to its state.
pub async fn spawn_backend(backend: Backend) -> (String, SharedBackend) {
    let shared = Arc::new(Mutex::new(backend));
    let app = Router::new().fallback(handle).with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("fake backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend crashed");
    });

    (format!("http://{}", addr), shared)
}

/// A base URL nothing listens on.
pub async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

/// Test server for the site, keeping cookies between requests like a browser.
pub fn create_test_server(api_url: &str) -> TestServer {
    let state = AppState::new(Config::with_api_url(api_url)).expect("app state");
    let mut server = TestServer::new(router(Arc::new(state))).expect("test server");
    server.save_cookies();
    server
}

pub async fn login(server: &TestServer, password: &str) {
    server
        .post("/adm/login")
        .form(&[("email", "adm@site.dev"), ("password", password)])
        .await;
}
