//! Administrator accounts. Nothing stops an admin from deleting their own
//! account; the backend decides.

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
use crate::models::{AdministratorUpdate, NewAdministrator};
use crate::state::AppState;
use crate::templates::render_template;

const LIST_PATH: &str = "/adm/admins";

#[derive(Debug, Deserialize)]
pub struct AdministratorForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl AdministratorForm {
    fn into_new(self) -> Option<NewAdministrator> {
        Some(NewAdministrator {
            email: filled(&self.email)?,
            password: (!self.password.is_empty()).then_some(self.password)?,
        })
    }

    fn into_update(self) -> AdministratorUpdate {
        AdministratorUpdate {
            email: filled(&self.email),
            password: (!self.password.is_empty()).then_some(self.password),
        }
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
) -> Result<Response, AdminError> {
    let administrators = admin
        .report(
            state.upstream.list_administrators(&admin.token).await,
            "Erro ao carregar administradores",
        )
        .await?
        .unwrap_or_default();

    let mut ctx = admin_context(&admin, "admins").await;
    ctx.insert("administrators", &administrators);
    Ok(render_template(&state, "adm/admins.html", &ctx).into_response())
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Form(form): Form<AdministratorForm>,
) -> Result<Redirect, AdminError> {
    let Some(input) = form.into_new() else {
        return Ok(redirect_with(&admin, LIST_PATH, Flash::error("Preencha email e senha")).await);
    };

    let created = admin
        .report(
            state.upstream.create_administrator(&admin.token, &input).await,
            "Erro ao adicionar administrador",
        )
        .await?;

    if created.is_some() {
        tracing::info!(email = %input.email, "Administrator created");
        return Ok(redirect_with(
            &admin,
            LIST_PATH,
            Flash::success("Administrador criado com sucesso"),
        )
        .await);
    }
    Ok(Redirect::to(LIST_PATH))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    admin: RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<AdministratorForm>,
) -> Result<Redirect, AdminError> {
    let update = form.into_update();
    if update.is_empty() {
        return Ok(redirect_with(
            &admin,
            LIST_PATH,
            Flash::error("Informe novo email e/ou senha."),
        )
        .await);
    }

    let updated = admin
        .report(
            state
                .upstream
                .update_administrator(&admin.token, &id, &update)
                .await,
            "Erro ao atualizar administrador",
        )
        .await?;

    if updated.is_some() {
        tracing::info!(%id, "Administrator updated");
        return Ok(
            redirect_with(&admin, LIST_PATH, Flash::success("Administrador atualizado")).await,
        );
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
        "admins",
        Confirmation {
            title: "Remover administrador",
            message: "Tem certeza que deseja remover este administrador?".to_string(),
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
            state.upstream.delete_administrator(&admin.token, &id).await,
            "Erro ao remover administrador",
        )
        .await?;

    if deleted.is_some() {
        tracing::info!(%id, "Administrator deleted");
        return Ok(redirect_with(&admin, LIST_PATH, Flash::success("Administrador removido")).await);
    }
    Ok(Redirect::to(LIST_PATH))
}
