use axum::response::Html;
use std::path::Path;
use tera::{Context, Tera};

use crate::state::AppState;

/// Loads every `.html` file under `dir`, named by its path relative to `dir`.
pub fn load(dir: &Path) -> Result<Tera, tera::Error> {
    let pattern = dir.join("**").join("*.html");
    let tera = Tera::new(&pattern.to_string_lossy())?;
    tracing::debug!(
        templates = tera.get_template_names().count(),
        dir = %dir.display(),
        "Templates loaded"
    );
    Ok(tera)
}

pub fn render_template(state: &AppState, name: &str, ctx: &Context) -> Html<String> {
    match state.tera.render(name, ctx) {
        Ok(rendered) => Html(rendered),
        Err(e) => {
            tracing::error!(template = name, error = ?e, "Template render failed");
            Html(format!("Template error: {}", name))
        }
    }
}
