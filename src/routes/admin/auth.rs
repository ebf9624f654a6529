use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use tower_sessions::Session;

use crate::error::{AdminError, LOGIN_PATH};
use crate::models::Credentials;
use crate::session::{self, SessionToken};
use crate::state::AppState;
use crate::templates::render_template;
use crate::upstream::UpstreamError;

const INVALID_CREDENTIALS: &str = "Credenciais inválidas";
const LOGIN_FAILED: &str = "Erro ao fazer login";
const SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    expired: Option<String>,
}

pub async fn login_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    let error = query.expired.map(|_| SESSION_EXPIRED);
    render_login(&state, "", error)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(credentials): Form<Credentials>,
) -> Result<Response, AdminError> {
    let grant = match state.upstream.login(&credentials).await {
        Ok(grant) => grant,
        Err(UpstreamError::Transport(e)) => {
            tracing::error!(error = %e, "Login request failed");
            return Ok(render_login(&state, &credentials.email, Some(LOGIN_FAILED)).into_response());
        }
        Err(e) => {
            tracing::warn!(email = %credentials.email, error = %e, "Login refused");
            return Ok(
                render_login(&state, &credentials.email, Some(INVALID_CREDENTIALS)).into_response(),
            );
        }
    };

    let token = SessionToken::from_login(grant.token, &grant.expires_in, session::now_millis());
    session::set_auth_token(&session, &token).await?;

    tracing::info!(email = %credentials.email, expires_at = token.expires_at, "Admin logged in");
    Ok(Redirect::to("/adm/forms").into_response())
}

pub async fn logout(session: Session) -> Result<Redirect, AdminError> {
    session::remove_auth_token(&session).await?;
    Ok(Redirect::to(LOGIN_PATH))
}

fn render_login(state: &AppState, email: &str, error: Option<&str>) -> axum::response::Html<String> {
    let mut ctx = Context::new();
    ctx.insert("email", email);
    ctx.insert("error", &error);
    render_template(state, "adm/login.html", &ctx)
}
