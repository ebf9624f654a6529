use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Where the admin area sends a visitor whose session is gone.
pub const LOGIN_PATH: &str = "/adm/login";
pub const SESSION_EXPIRED_PATH: &str = "/adm/login?expired=1";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("backend client error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("template error: {0}")]
    Templates(#[from] tera::Error),
}

/// Errors raised by admin page handlers.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The backend answered 401; the stored session has already been cleared.
    #[error("admin session expired")]
    SessionExpired,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::SessionExpired => return Redirect::to(SESSION_EXPIRED_PATH).into_response(),
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = %self, "Admin request failed");

        (
            status,
            Html(format!(
                "<h1>Algo deu errado</h1><p>Tente novamente em instantes.</p>\
                 <p><a href=\"{}\">Voltar</a></p>",
                LOGIN_PATH
            )),
        )
            .into_response()
    }
}
