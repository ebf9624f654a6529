use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid backend URL: {0}")]
    InvalidBaseUrl(String),

    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected the session token")]
    Unauthorized,

    #[error("backend reported a conflict: {0}")]
    Conflict(String),

    #[error("backend answered {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("unexpected backend response: {0}")]
    InvalidBody(String),
}

/// Status and JSON body of a backend answer. `body` is `None` when the
/// backend sent nothing or something that is not JSON.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `message` or `error` string from the body, if any. Empty strings
    /// count as absent.
    pub fn message(&self) -> Option<String> {
        ["message", "error"]
            .iter()
            .find_map(|key| self.field(key))
    }

    /// Non-empty string at `key` in the body.
    pub fn field(&self, key: &str) -> Option<String> {
        self.body
            .as_ref()?
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn into_result(self) -> Result<Option<Value>, UpstreamError> {
        match self.status {
            s if s.is_success() => Ok(self.body),
            StatusCode::UNAUTHORIZED => Err(UpstreamError::Unauthorized),
            StatusCode::CONFLICT => Err(UpstreamError::Conflict(
                self.message().unwrap_or_default(),
            )),
            status => Err(UpstreamError::Status {
                status,
                message: self.message().unwrap_or_default(),
            }),
        }
    }
}

/// Thin client for the backend API. Every call goes through [`forward`],
/// which the JSON proxy routes also use directly.
///
/// [`forward`]: UpstreamClient::forward
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(api_url: &str) -> Result<Self, UpstreamError> {
        let base_url =
            Url::parse(api_url).map_err(|e| UpstreamError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(api_url.to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Backend URL for `segments`, each one percent-encoded on its own so an
    /// id can never reach a different resource.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends one request to the backend and returns whatever it answered.
    ///
    /// `authorization` is passed through verbatim as the `Authorization`
    /// header. Only transport failures are errors here; HTTP error statuses
    /// come back as a normal [`UpstreamReply`].
    pub async fn forward(
        &self,
        method: Method,
        segments: &[&str],
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = self.url(segments);
        debug!(%method, %url, authorized = authorization.is_some(), "Forwarding to backend");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(auth) = authorization {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "Backend request failed");
            UpstreamError::Transport(e)
        })?;
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        debug!(%method, %url, status = status.as_u16(), "Backend answered");
        Ok(UpstreamReply { status, body })
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
