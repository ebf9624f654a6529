//! One-shot notices shown on the next admin page render.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Stores `flash` for the next page. Failures are logged, never surfaced:
/// losing a notice must not fail the action that produced it.
pub async fn push(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(FLASH_KEY, &flash).await {
        tracing::warn!(error = %e, "Failed to store flash message");
    }
}

pub async fn take(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(FLASH_KEY).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash message");
            None
        }
    }
}
