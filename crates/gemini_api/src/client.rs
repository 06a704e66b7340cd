use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::GeminiApiConfig;
use crate::error::{parse_error_message, GeminiApiError};
use crate::headers::build_headers;
use crate::payload::{Content, GenerateContentRequest};
use crate::response::GenerateContentResponse;
use crate::url::generate_content_url;

#[derive(Debug)]
pub struct GeminiApiClient {
    http: Client,
    config: GeminiApiConfig,
}

impl GeminiApiClient {
    pub fn new(config: GeminiApiConfig) -> Result<Self, GeminiApiError> {
        if config.api_key.trim().is_empty() {
            return Err(GeminiApiError::MissingApiKey);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GeminiApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiApiConfig {
        &self.config
    }

    pub fn endpoint(&self) -> String {
        generate_content_url(&self.config.base_url, &self.config.model)
    }

    pub fn build_headers(&self, user_agent: Option<&str>) -> Result<HeaderMap, GeminiApiError> {
        let headers = build_headers(&self.config, user_agent)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    GeminiApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    GeminiApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<reqwest::RequestBuilder, GeminiApiError> {
        validate_request_payload_shape(request)?;

        let headers = self.build_headers(self.config.user_agent.as_deref())?;
        Ok(self
            .http
            .post(self.endpoint())
            .headers(headers)
            .json(request))
    }

    /// Sends one request and decodes the response body. No retries.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let response = self.build_request(request)?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeminiApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        serde_json::from_str::<GenerateContentResponse>(&body).map_err(GeminiApiError::from)
    }

    /// Sends one request and returns the reply text, mapping safety blocks and
    /// empty candidates to errors.
    pub async fn generate_text(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError> {
        self.generate_content(request).await?.into_text()
    }
}

fn validate_request_payload_shape(request: &GenerateContentRequest) -> Result<(), GeminiApiError> {
    let Some(last) = request.contents.last() else {
        return Err(GeminiApiError::InvalidRequestPayload(
            "'contents' must contain at least one turn".to_string(),
        ));
    };

    if last.role.as_deref() != Some(Content::ROLE_USER) {
        return Err(GeminiApiError::InvalidRequestPayload(format!(
            "the final turn must have role 'user', got {}",
            last.role.as_deref().unwrap_or("none")
        )));
    }

    if request
        .contents
        .iter()
        .any(|content| content.joined_text().is_none())
    {
        return Err(GeminiApiError::InvalidRequestPayload(
            "every turn must carry at least one text part".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_request_payload_shape;
    use crate::error::GeminiApiError;
    use crate::payload::{Content, GenerateContentRequest, Part};

    #[test]
    fn payload_validation_accepts_alternating_turns_ending_in_user() {
        let request = GenerateContentRequest::new(vec![
            Content::user("Hello"),
            Content::model("Hi there!"),
            Content::user("How are you?"),
        ]);

        assert!(validate_request_payload_shape(&request).is_ok());
    }

    #[test]
    fn payload_validation_rejects_empty_contents() {
        let request = GenerateContentRequest::new(Vec::new());

        assert!(matches!(
            validate_request_payload_shape(&request),
            Err(GeminiApiError::InvalidRequestPayload(message)) if message.contains("at least one turn")
        ));
    }

    #[test]
    fn payload_validation_rejects_model_final_turn() {
        let request =
            GenerateContentRequest::new(vec![Content::user("Hello"), Content::model("Hi")]);

        assert!(matches!(
            validate_request_payload_shape(&request),
            Err(GeminiApiError::InvalidRequestPayload(message)) if message.contains("got model")
        ));
    }

    #[test]
    fn payload_validation_rejects_turns_without_text() {
        let request = GenerateContentRequest::new(vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part { text: None }],
        }]);

        assert!(validate_request_payload_shape(&request).is_err());
    }
}
