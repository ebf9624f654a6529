//! Showcased projects.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{admin_context, confirm_page, filled, redirect_with, Confirmation};
use crate::error::AdminError;
use crate::flash::Flash;
use crate::middleware::RequireAdmin;
use crate::models::ProjectInput;
use crate::state::AppState;
use crate::templates::render_template;

const LIST_PATH: &str = "/adm/projects";
const MISSING_FIELDS: &str = "Preencha nome, descrição e link";

#[derive(Debug, Deserialize)]
pub struct ProjectForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    link: String,
    /// Checkbox: present (usually `on`) when ticked.
    is_preview: Option<String>,
}

impl ProjectForm {
    fn into_input(self) -> Option<ProjectInput> {
        Some(ProjectInput {
            name: filled(&self.name)?,
            description: filled(&self.description)?,
            link: filled(&self.link)?,
            is_preview: self.is_preview.is_some(),
        })
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
) -> Result<Response, AdminError> {
    let projects = admin
        .report(
            state.upstream.list_projects(Some(&admin.token)).await,
            "Erro ao carregar projetos",
        )
        .await?
        .unwrap_or_default();

    let mut ctx = admin_context(&admin, "projects").await;
    ctx.insert("projects", &projects);
    Ok(render_template(&state, "adm/projects.html", &ctx).into_response())
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Form(form): Form<ProjectForm>,
) -> Result<Redirect, AdminError> {
    let Some(input) = form.into_input() else {
        return Ok(redirect_with(&admin, LIST_PATH, Flash::error(MISSING_FIELDS)).await);
    };

    let created = admin
        .report(
            state.upstream.create_project(&admin.token, &input).await,
            "Erro ao criar projeto",
        )
        .await?;

    if created.is_some() {
        tracing::info!(name = %input.name, "Project created");
        return Ok(redirect_with(&admin, LIST_PATH, Flash::success("Projeto criado")).await);
    }
    Ok(Redirect::to(LIST_PATH))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response, AdminError> {
    let Some(projects) = admin
        .report(
            state.upstream.list_projects(Some(&admin.token)).await,
            "Erro ao carregar projetos",
        )
        .await?
    else {
        return Ok(Redirect::to(LIST_PATH).into_response());
    };

    let Some(project) = projects.into_iter().find(|p| p.id == id) else {
        return Ok(redirect_with(&admin, LIST_PATH, Flash::error("Projeto não encontrado"))
            .await
            .into_response());
    };

    let mut ctx = admin_context(&admin, "projects").await;
    ctx.insert("project", &project);
    Ok(render_template(&state, "adm/project_edit.html", &ctx).into_response())
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<ProjectForm>,
) -> Result<Redirect, AdminError> {
    let Some(input) = form.into_input() else {
        let edit_path = format!("{}/{}/edit", LIST_PATH, id);
        return Ok(redirect_with(&admin, &edit_path, Flash::error(MISSING_FIELDS)).await);
    };

    let updated = admin
        .report(
            state.upstream.update_project(&admin.token, &id, &input).await,
            "Erro ao atualizar projeto",
        )
        .await?;

    if updated.is_some() {
        tracing::info!(%id, "Project updated");
        return Ok(redirect_with(&admin, LIST_PATH, Flash::success("Projeto atualizado")).await);
    }
    Ok(Redirect::to(LIST_PATH))
}

pub async fn confirm_delete(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> impl IntoResponse {
    confirm_page(
        &state,
        &admin,
        "projects",
        Confirmation {
            title: "Excluir projeto",
            message: "Tem certeza que deseja excluir este projeto?".to_string(),
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
) -> Result<Redirect, AdminError> {
    let deleted = admin
        .report(
            state.upstream.delete_project(&admin.token, &id).await,
            "Erro ao deletar projeto",
        )
        .await?;

    if deleted.is_some() {
        tracing::info!(%id, "Project deleted");
        return Ok(redirect_with(&admin, LIST_PATH, Flash::success("Projeto excluído")).await);
    }
    Ok(Redirect::to(LIST_PATH))
}
