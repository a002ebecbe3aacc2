use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("RequestError: {0}")]
    RequestError(String),
    #[error("StatusError: {status}: {body}")]
    StatusError { status: u16, body: String },
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("EmptyResponse")]
    EmptyResponse,
}

/// A single turn sent to a chat-style model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// POST a JSON body and decode the JSON reply.
///
/// `auth` is applied to the request builder so each provider can attach its
/// own credential header.
pub(crate) async fn post_json<B, T>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
    auth: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
) -> Result<T, LlmError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let resp = auth(http.post(url).json(body))
        .send()
        .await
        .map_err(|e| LlmError::RequestError(e.to_string()))?;

    let status = resp.status();
    if status == 401 || status == 403 {
        return Err(LlmError::Unauthorized);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Model endpoint returned an error status");
        return Err(LlmError::StatusError {
            status: status.as_u16(),
            body,
        });
    }

    resp.json::<T>().await.map_err(|e| {
        LlmError::ParsingError(format!("Failed to parse response as JSON: {}", e))
    })
}
