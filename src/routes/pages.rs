use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form,
};
use serde::Serialize;
use std::sync::Arc;
use tera::Context;

use crate::contact::{self, ContactForm, ContactStatus};
use crate::content;
use crate::models::Project;
use crate::state::AppState;
use crate::templates::render_template;

/// Contact section state as the template sees it.
#[derive(Debug, Default, Serialize)]
struct ContactView {
    status: ContactStatus,
    button_label: &'static str,
    form: ContactForm,
    error_message: Option<String>,
    error_field: Option<&'static str>,
}

impl ContactView {
    fn idle() -> Self {
        Self {
            button_label: ContactStatus::Idle.button_label(),
            ..Default::default()
        }
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    render_landing(&state, ContactView::idle()).await
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    let view = match contact::submit(&state.upstream, &form).await {
        Ok(()) => ContactView {
            status: ContactStatus::Success,
            button_label: ContactStatus::Success.button_label(),
            ..Default::default()
        },
        Err(e) => ContactView {
            status: ContactStatus::Error,
            button_label: ContactStatus::Error.button_label(),
            error_field: e.field(),
            error_message: Some(e.to_string()),
            form,
        },
    };

    render_landing(&state, view).await
}

/// Projects for the showcase; the static set stands in when the backend
/// cannot deliver them.
async fn showcase_projects(state: &AppState) -> Vec<Project> {
    match state.upstream.list_projects(None).await {
        Ok(projects) => projects,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load projects, using fallback list");
            content::fallback_projects()
        }
    }
}

async fn render_landing(state: &AppState, contact: ContactView) -> Html<String> {
    let mut ctx = Context::new();
    ctx.insert("skills", content::SKILLS);
    ctx.insert("highlights", content::HIGHLIGHTS);
    ctx.insert("tools", content::TOOLS);
    ctx.insert("projects", &showcase_projects(state).await);
    ctx.insert("contact_phone", content::CONTACT_PHONE);
    ctx.insert("contact_email", content::CONTACT_EMAIL);
    ctx.insert("contact", &contact);
    ctx.insert("sending_label", ContactStatus::Loading.button_label());

    render_template(state, "index.html", &ctx)
}
