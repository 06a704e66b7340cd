use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum GeminiApiError {
    MissingApiKey,
    InvalidHeader(String),
    InvalidRequestPayload(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    Blocked { reason: String },
    EmptyResponse,
    Unknown(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(rename = "error")]
    pub value: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayloadFields {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ErrorPayloadFields {
    fn summary(&self) -> Option<String> {
        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())?;
        match self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            Some(status) => Some(format!("{status}: {message}")),
            None => Some(message.to_owned()),
        }
    }
}

impl GeminiApiError {
    /// Returns true when the model refused to answer for safety reasons.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

impl fmt::Display for GeminiApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key is required"),
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::InvalidRequestPayload(message) => {
                write!(f, "invalid request payload: {message}")
            }
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "malformed response: {error}"),
            Self::Blocked { reason } => write!(f, "response blocked: {reason}"),
            Self::EmptyResponse => write!(f, "response contained no text"),
            Self::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for GeminiApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Serde(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeminiApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for GeminiApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Summarize an error body as `STATUS: message`, falling back to the raw body
/// and then to the HTTP reason phrase.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorPayload { value: Some(fields) }) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(summary) = fields.summary() {
            return summary;
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.trim().to_string()
    }
}
