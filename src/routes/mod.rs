pub mod admin;
pub mod pages;
pub mod proxy;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{time::Duration, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "portfolio_session";

/// Idle time after which the server forgets a visitor's session.
const SESSION_IDLE_DAYS: i64 = 7;

pub fn router(state: Arc<AppState>) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_IDLE_DAYS)))
        .with_secure(state.config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/");

    Router::new()
        .route("/", get(pages::index))
        .route("/contact", post(pages::submit_contact))
        .nest("/adm", admin_routes())
        .nest("/api/proxy", proxy_routes().layer(CorsLayer::permissive()))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes() -> Router<Arc<AppState>> {
    use admin::{admins, auth, forms, projects};

    Router::new()
        .route("/", get(admin::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/forms", get(forms::list))
        .route("/forms/:id", get(forms::detail))
        .route("/forms/:id/delete", get(forms::confirm_delete).post(forms::delete))
        .route("/projects", get(projects::list).post(projects::create))
        .route("/projects/:id", post(projects::update))
        .route("/projects/:id/edit", get(projects::edit))
        .route(
            "/projects/:id/delete",
            get(projects::confirm_delete).post(projects::delete),
        )
        .route("/admins", get(admins::list).post(admins::create))
        .route("/admins/:id", post(admins::update))
        .route(
            "/admins/:id/delete",
            get(admins::confirm_delete).post(admins::delete),
        )
}

fn proxy_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/adm",
            get(proxy::list_administrators).post(proxy::create_administrator),
        )
        .route("/adm/login", post(proxy::administrator_login))
        .route(
            "/adm/:id",
            put(proxy::update_administrator).delete(proxy::delete_administrator),
        )
        .route(
            "/users",
            get(proxy::list_submissions).post(proxy::create_submission),
        )
        .route("/users/:id", delete(proxy::delete_submission))
        .route(
            "/users/:id/status",
            patch(proxy::update_submission_status),
        )
        .route(
            "/projects",
            get(proxy::list_projects).post(proxy::create_project),
        )
        .route(
            "/projects/:id",
            put(proxy::update_project).delete(proxy::delete_project),
        )
}
