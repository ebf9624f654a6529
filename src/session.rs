//! Admin session record.
//!
//! The session holds a single JSON string `{ "value": <token>, "expiresAt":
//! <epoch ms> }` under [`TOKEN_KEY`]. Validity is purely the declared expiry;
//! the token itself is only checked by the backend, and a 401 from it clears
//! the record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::Session;

pub const TOKEN_KEY: &str = "adminToken";

/// Plain-string keys written by older versions of the admin panel.
pub const LEGACY_TOKEN_KEYS: [&str; 2] = ["token", "admin_token"];

/// Lifetime used when the backend's `expiresIn` cannot be read: one day.
pub const DEFAULT_TTL_MS: i64 = 24 * 60 * 60 * 1000;

pub type SessionResult<T> = Result<T, tower_sessions::session::Error>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub value: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

impl SessionToken {
    pub fn new(value: impl Into<String>, expires_at: i64) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Builds the record from a login answer. `expires_in` is read the way a
    /// browser's `new Date(expiresIn)` reads it: numbers are epoch
    /// milliseconds, strings are dates.
    pub fn from_login(value: impl Into<String>, expires_in: &Value, now_ms: i64) -> Self {
        let expires_at = expiry_millis(expires_in).unwrap_or(now_ms + DEFAULT_TTL_MS);
        Self::new(value, expires_at)
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }

    /// Parses the stored string; `None` for anything malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

fn expiry_millis(expires_in: &Value) -> Option<i64> {
    match expires_in {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
                .ok()
                .or_else(|| naive_utc_millis(s))
                .or_else(|| s.parse::<i64>().ok())
        }
        _ => None,
    }
}

/// ISO dates and datetimes without an offset, read as UTC.
fn naive_utc_millis(s: &str) -> Option<i64> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc().timestamp_millis())
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub async fn set_auth_token(session: &Session, token: &SessionToken) -> SessionResult<()> {
    let raw = serde_json::to_string(token).map_err(tower_sessions::session::Error::SerdeJson)?;
    session.insert(TOKEN_KEY, raw).await
}

/// Returns the bearer token if the stored record is still valid at `now_ms`.
///
/// Expired or malformed records are removed as a side effect. Legacy keys are
/// only consulted when no record exists at all.
pub async fn get_auth_token(session: &Session, now_ms: i64) -> SessionResult<Option<String>> {
    let Some(stored) = session.get_value(TOKEN_KEY).await? else {
        return legacy_token(session).await;
    };

    let token = match stored {
        Value::String(raw) => SessionToken::parse(&raw),
        other => serde_json::from_value::<SessionToken>(other).ok(),
    };

    match token {
        Some(token) if !token.is_expired_at(now_ms) => Ok(Some(token.value)),
        Some(_) => {
            tracing::info!("Admin session expired");
            remove_auth_token(session).await?;
            Ok(None)
        }
        None => {
            tracing::warn!("Discarding malformed admin session record");
            remove_auth_token(session).await?;
            Ok(None)
        }
    }
}

async fn legacy_token(session: &Session) -> SessionResult<Option<String>> {
    for key in LEGACY_TOKEN_KEYS {
        if let Some(Value::String(token)) = session.get_value(key).await? {
            if !token.is_empty() {
                return Ok(Some(token));
            }
        }
    }
    Ok(None)
}

pub async fn is_authenticated(session: &Session, now_ms: i64) -> SessionResult<bool> {
    Ok(get_auth_token(session, now_ms).await?.is_some())
}

pub async fn remove_auth_token(session: &Session) -> SessionResult<()> {
    session.remove_value(TOKEN_KEY).await?;
    for key in LEGACY_TOKEN_KEYS {
        session.remove_value(key).await?;
    }
    Ok(())
}
