//! Admin authentication extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::{AdminError, LOGIN_PATH};
use crate::flash::{self, Flash};
use crate::session;
use crate::upstream::UpstreamError;

/// Extractor for admin pages: a session holding an unexpired token.
///
/// Visitors without one are redirected to the login page; an expired record
/// is removed on the way.
pub struct RequireAdmin {
    pub session: Session,
    pub token: String,
}

pub enum AdminAuthRejection {
    RedirectToLogin,
    /// The session layer is missing or its store failed.
    Unavailable,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::Unavailable)?;

        let token = session::get_auth_token(&session, session::now_millis())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to read admin session");
                AdminAuthRejection::Unavailable
            })?
            .ok_or(AdminAuthRejection::RedirectToLogin)?;

        Ok(Self { session, token })
    }
}

impl RequireAdmin {
    /// Turns a backend 401 into [`AdminError::SessionExpired`], clearing the
    /// stored token first.
    pub async fn guard<T>(&self, result: Result<T, UpstreamError>) -> Result<T, AdminError> {
        match result {
            Err(UpstreamError::Unauthorized) => {
                tracing::info!("Backend rejected admin token, ending session");
                session::remove_auth_token(&self.session).await?;
                Err(AdminError::SessionExpired)
            }
            other => other.map_err(AdminError::from),
        }
    }

    /// Like [`guard`](Self::guard), but any other failure is logged and
    /// reported to the admin as `message` on the next page; `Ok(None)` then.
    pub async fn report<T>(
        &self,
        result: Result<T, UpstreamError>,
        message: &str,
    ) -> Result<Option<T>, AdminError> {
        match self.guard(result).await {
            Ok(value) => Ok(Some(value)),
            Err(AdminError::Upstream(e)) => {
                tracing::error!(error = %e, "{}", message);
                flash::push(&self.session, Flash::error(message)).await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
