//! Public contact form: validation, submission and interpretation of the
//! backend's answer.

use regex::Regex;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::NewContact;
use crate::phone::format_phone;
use crate::upstream::{UpstreamClient, UpstreamReply, SUBMISSIONS};

pub const MISSING_CONTACT: &str = "Informe seu nome e pelo menos um contato (email ou telefone).";
pub const DUPLICATE_EMAIL: &str =
    "Este email já foi utilizado para contato. Use outro email ou aguarde nosso retorno.";
pub const INVALID_DATA: &str = "Dados inválidos. Verifique as informações e tente novamente.";
pub const SEND_FAILED: &str = "Erro ao enviar sua mensagem. Tente novamente em instantes.";
pub const NETWORK_FAILED: &str = "Falha de rede ao enviar. Verifique sua conexão.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{}", MISSING_CONTACT)]
    MissingContact,
    #[error("{}", DUPLICATE_EMAIL)]
    DuplicateEmail,
    #[error("{0}")]
    Rejected(String),
    #[error("{}", SEND_FAILED)]
    Failed,
    #[error("{}", NETWORK_FAILED)]
    Network,
}

impl ContactError {
    /// Form field the error belongs to, if it is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateEmail => Some("email"),
            _ => None,
        }
    }
}

/// Result indicator behind the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl ContactStatus {
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Idle => "Enviar mensagem",
            Self::Loading => "Enviando...",
            Self::Success => "Enviado!",
            Self::Error => "Erro ao enviar",
        }
    }
}

impl ContactForm {
    /// Trims the fields, applies the phone mask and checks that there is a
    /// name plus at least one way to reach the sender.
    pub fn validate(&self) -> Result<NewContact, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = format_phone(&self.phone);

        if name.is_empty() || (email.is_empty() && phone.is_empty()) {
            return Err(ContactError::MissingContact);
        }

        Ok(NewContact {
            name: name.to_string(),
            email: email.to_string(),
            phone,
            description: self.message.trim().to_string(),
        })
    }
}

fn duplicate_message() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)email.*(exist|já.*usad|já.*utilizad|já.*cadastrad)")
            .expect("valid duplicate-email pattern")
    })
}

/// Interprets the backend's answer to a new submission.
pub fn classify(reply: &UpstreamReply) -> Result<(), ContactError> {
    let message = reply.message().unwrap_or_default().to_lowercase();
    let code = reply
        .body
        .as_ref()
        .and_then(|b| b.get("code"))
        .and_then(Value::as_str);

    if reply.status == StatusCode::CONFLICT
        || code == Some("EMAIL_EXISTS")
        || duplicate_message().is_match(&message)
    {
        return Err(ContactError::DuplicateEmail);
    }

    if reply.is_success() {
        return Ok(());
    }

    match reply.status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Err(ContactError::Rejected(
            reply
                .field("message")
                .unwrap_or_else(|| INVALID_DATA.to_string()),
        )),
        _ => Err(ContactError::Failed),
    }
}

/// Validates `form` and, only if it passes, posts it to the backend.
pub async fn submit(upstream: &UpstreamClient, form: &ContactForm) -> Result<(), ContactError> {
    let contact = form.validate()?;
    let body = serde_json::to_value(&contact).map_err(|_| ContactError::Failed)?;

    match upstream
        .forward(Method::POST, &[SUBMISSIONS], None, Some(&body))
        .await
    {
        Ok(reply) => {
            let outcome = classify(&reply);
            if let Err(ref e) = outcome {
                tracing::warn!(status = reply.status.as_u16(), error = %e, "Contact submission refused");
            } else {
                tracing::info!("Contact submission stored");
            }
            outcome
        }
        Err(e) => {
            tracing::error!(error = %e, "Contact submission failed");
            Err(ContactError::Network)
        }
    }
}
