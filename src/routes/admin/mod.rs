//! Admin area: login plus the submissions, projects and administrators
//! screens. Every backend call carries the session's bearer token.

pub mod admins;
pub mod auth;
pub mod forms;
pub mod projects;

use axum::response::{Html, IntoResponse, Redirect};
use serde::Serialize;
use tera::Context;

use crate::flash::{self, Flash};
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::templates::render_template;

pub async fn home() -> impl IntoResponse {
    Redirect::to("/adm/forms")
}

/// Context shared by the admin pages: active nav entry and pending notice.
async fn admin_context(admin: &RequireAdmin, nav: &str) -> Context {
    let mut ctx = Context::new();
    ctx.insert("nav", nav);
    ctx.insert("flash", &flash::take(&admin.session).await);
    ctx
}

#[derive(Debug, Serialize)]
struct Confirmation<'a> {
    title: &'a str,
    message: String,
    action: String,
    cancel: &'a str,
}

/// The step between clicking "delete" and the destructive POST.
async fn confirm_page(
    state: &AppState,
    admin: &RequireAdmin,
    nav: &str,
    confirmation: Confirmation<'_>,
) -> Html<String> {
    let mut ctx = admin_context(admin, nav).await;
    ctx.insert("confirm", &confirmation);
    render_template(state, "adm/confirm_delete.html", &ctx)
}

async fn redirect_with(admin: &RequireAdmin, to: &str, flash: Flash) -> Redirect {
    flash::push(&admin.session, flash).await;
    Redirect::to(to)
}

/// Blank form fields count as absent.
fn filled(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
