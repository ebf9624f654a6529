//! Records exchanged with the backend API.
//!
//! The backend is loose about its JSON (MongoDB-style `_id` next to plain `id`,
//! missing optional fields), so listings are read as `serde_json::Value` and
//! mapped field by field instead of being deserialized strictly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[serde(rename = "novo")]
    New,
    #[serde(rename = "respondido")]
    Answered,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "novo",
            Self::Answered => "respondido",
        }
    }

    /// Anything the backend sends other than `respondido` counts as new.
    fn from_upstream(raw: Option<&str>) -> Self {
        match raw {
            Some("respondido") => Self::Answered,
            _ => Self::New,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub status: SubmissionStatus,
    /// Creation time formatted for display, empty when unknown.
    pub created_at: String,
}

impl ContactSubmission {
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            id: record_id(value)?,
            name: non_empty(value, "name").unwrap_or_else(|| "Sem nome".to_string()),
            email: non_empty(value, "email"),
            phone: non_empty(value, "phone"),
            message: non_empty(value, "description")
                .unwrap_or_else(|| "Sem mensagem".to_string()),
            status: SubmissionStatus::from_upstream(value.get("status").and_then(Value::as_str)),
            created_at: value
                .get("createdAt")
                .and_then(parse_timestamp)
                .map(format_timestamp)
                .unwrap_or_default(),
        })
    }

    pub fn is_new(&self) -> bool {
        self.status == SubmissionStatus::New
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_preview: bool,
    pub link: String,
    pub created_at: Option<String>,
}

impl Project {
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            id: record_id(value)?,
            name: non_empty(value, "name").unwrap_or_default(),
            description: non_empty(value, "description").unwrap_or_default(),
            is_preview: value
                .get("isPreview")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            link: non_empty(value, "link").unwrap_or_default(),
            created_at: value
                .get("createdAt")
                .and_then(parse_timestamp)
                .map(format_timestamp),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Administrator {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl Administrator {
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            id: record_id(value)?,
            email: non_empty(value, "email").unwrap_or_default(),
            name: non_empty(value, "name"),
        })
    }
}

/// Maps a JSON array of records, skipping entries without an identifier.
pub fn map_list<T>(body: Option<Value>, map: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    match body {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let mapped = map(item);
                if mapped.is_none() {
                    tracing::warn!(record = %item, "Skipping backend record without id");
                }
                mapped
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Body of the public contact form as the backend expects it.
#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    #[serde(rename = "isPreview")]
    pub is_preview: bool,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAdministrator {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdministratorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AdministratorUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login answer from the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    #[serde(rename = "expiresIn", default)]
    pub expires_in: Value,
}

/// Reads `_id`, falling back to `id`; numbers are stringified.
pub fn record_id(value: &Value) -> Option<String> {
    ["_id", "id"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn non_empty(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Accepts RFC 3339 strings or epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}
