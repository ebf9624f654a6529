//! Contact submissions received through the public form.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::{admin_context, confirm_page, redirect_with, Confirmation};
use crate::error::AdminError;
use crate::flash::Flash;
use crate::middleware::RequireAdmin;
use crate::models::SubmissionStatus;
use crate::state::AppState;
use crate::templates::render_template;

const LIST_PATH: &str = "/adm/forms";

pub async fn list(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
) -> Result<Response, AdminError> {
    let submissions = admin
        .report(
            state.upstream.list_submissions(&admin.token).await,
            "Erro ao carregar formulários",
        )
        .await?
        .unwrap_or_default();

    let mut ctx = admin_context(&admin, "forms").await;
    ctx.insert("submissions", &submissions);
    Ok(render_template(&state, "adm/forms.html", &ctx).into_response())
}

/// Shows one submission. Opening a `novo` submission marks it `respondido`.
pub async fn detail(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response, AdminError> {
    let Some(submissions) = admin
        .report(
            state.upstream.list_submissions(&admin.token).await,
            "Erro ao carregar formulário",
        )
        .await?
    else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    let Some(mut submission) = submissions.into_iter().find(|s| s.id == id) else {
        return Ok(redirect_with(&admin, LIST_PATH, Flash::error("Formulário não encontrado"))
            .await
            .into_response());
    };

    if submission.is_new() {
        let updated = admin
            .report(
                state
                    .upstream
                    .mark_submission_answered(&admin.token, &submission.id)
                    .await,
                "Erro ao atualizar status",
            )
            .await?;
        if updated.is_some() {
            tracing::info!(id = %submission.id, "Submission marked as answered");
            submission.status = SubmissionStatus::Answered;
        }
    }

    let mut ctx = admin_context(&admin, "forms").await;
    ctx.insert("submission", &submission);
    Ok(render_template(&state, "adm/form_detail.html", &ctx).into_response())
}

pub async fn confirm_delete(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> impl IntoResponse {
    confirm_page(
        &state,
        &admin,
        "forms",
        Confirmation {
            title: "Apagar formulário",
            message: "Tem certeza que deseja apagar este registro?".to_string(),
            action: format!("{}/{}/delete", LIST_PATH, id),
            cancel: LIST_PATH,
        },
    )
    .await
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response, AdminError> {
    let deleted = admin
        .report(
            state.upstream.delete_submission(&admin.token, &id).await,
            "Erro ao excluir formulário",
        )
        .await?;

    if deleted.is_some() {
        tracing::info!(%id, "Submission deleted");
        return Ok(redirect_with(&admin, LIST_PATH, Flash::success("Formulário excluído"))
            .await
            .into_response());
    }
    Ok(Redirect::to(LIST_PATH).into_response())
}
