//! Gemini API-backed implementation of the `chat_provider` transport boundary.
//!
//! This adapter translates provider-neutral turns into `generateContent`
//! payloads and maps transport failures onto [`GenerationError`]. Calls are
//! synchronous: each one blocks on a private current-thread runtime.

use std::sync::Arc;
use std::time::Duration;

use chat_provider::{
    GenerationError, ModelTransport, ProviderInitError, ProviderProfile, Turn, TurnRole,
};
use gemini_api::{Content, GeminiApiClient, GeminiApiConfig, GeminiApiError, GenerateContentRequest};

/// Stable provider identifier used for explicit startup selection.
pub const GEMINI_API_PROVIDER_ID: &str = "gemini";

/// Runtime configuration for the Gemini API provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl GeminiProviderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_gemini_api_config(self) -> GeminiApiConfig {
        let mut config = GeminiApiConfig::new(self.api_key).with_model(sanitize_model(self.model));

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait ContentClient: Send + Sync {
    fn generate_text(&self, request: &GenerateContentRequest) -> Result<String, GeminiApiError>;
}

#[derive(Debug)]
struct DefaultContentClient {
    client: GeminiApiClient,
    runtime: tokio::runtime::Runtime,
}

impl DefaultContentClient {
    fn new(client: GeminiApiClient) -> Result<Self, GeminiApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                GeminiApiError::Unknown(format!("failed to initialize tokio runtime: {error}"))
            })?;

        Ok(Self { client, runtime })
    }
}

impl ContentClient for DefaultContentClient {
    fn generate_text(&self, request: &GenerateContentRequest) -> Result<String, GeminiApiError> {
        self.runtime.block_on(self.client.generate_text(request))
    }
}

/// [`ModelTransport`] adapter backed by `gemini_api` transport primitives.
pub struct GeminiTransport {
    model_id: String,
    content_client: Arc<dyn ContentClient>,
}

impl GeminiTransport {
    /// Creates a transport using the real Gemini REST endpoint.
    pub fn new(config: GeminiProviderConfig) -> Result<Self, ProviderInitError> {
        let config = config.into_gemini_api_config();
        let model_id = config.model.clone();
        let client = GeminiApiClient::new(config).map_err(map_init_error)?;
        let content_client = Arc::new(DefaultContentClient::new(client).map_err(map_init_error)?);

        log::debug!("gemini transport ready (model={model_id})");
        Ok(Self {
            model_id,
            content_client,
        })
    }

    #[cfg(test)]
    fn with_content_client_for_tests(
        model: impl Into<String>,
        content_client: Arc<dyn ContentClient>,
    ) -> Self {
        Self {
            model_id: sanitize_model(model.into()),
            content_client,
        }
    }
}

impl ModelTransport for GeminiTransport {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: GEMINI_API_PROVIDER_ID.to_string(),
            model_id: self.model_id.clone(),
        }
    }

    fn send(&self, turns: &[Turn]) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::new(turns.iter().map(content_for_turn).collect());
        log::debug!(
            "gemini generateContent: model={} turns={}",
            self.model_id,
            turns.len()
        );

        self.content_client
            .generate_text(&request)
            .map_err(map_generation_error)
    }
}

fn content_for_turn(turn: &Turn) -> Content {
    match turn.role {
        TurnRole::User => Content::user(turn.text.clone()),
        TurnRole::Model => Content::model(turn.text.clone()),
    }
}

fn map_generation_error(error: GeminiApiError) -> GenerationError {
    match error {
        GeminiApiError::Blocked { reason } => {
            log::info!("gemini response blocked: {reason}");
            GenerationError::blocked(reason)
        }
        error => {
            log::warn!("gemini request failed: {error}");
            GenerationError::api(format!("Gemini API request failed: {error}"))
        }
    }
}

fn sanitize_model(model: String) -> String {
    let trimmed = model.trim();
    if trimmed.is_empty() {
        gemini_api::url::DEFAULT_GEMINI_MODEL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn map_init_error(error: GeminiApiError) -> ProviderInitError {
    ProviderInitError::new(format!("Failed to initialize gemini provider: {error}"))
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard};

    use super::*;

    struct FakeContentClient {
        observed: Mutex<Vec<GenerateContentRequest>>,
        outcome: Mutex<Option<Result<String, GeminiApiError>>>,
    }

    impl FakeContentClient {
        fn replying(outcome: Result<String, GeminiApiError>) -> Arc<Self> {
            Arc::new(Self {
                observed: Mutex::new(Vec::new()),
                outcome: Mutex::new(Some(outcome)),
            })
        }

        fn observed(&self) -> Vec<GenerateContentRequest> {
            lock_unpoisoned(&self.observed).clone()
        }
    }

    impl ContentClient for FakeContentClient {
        fn generate_text(
            &self,
            request: &GenerateContentRequest,
        ) -> Result<String, GeminiApiError> {
            lock_unpoisoned(&self.observed).push(request.clone());

            match lock_unpoisoned(&self.outcome).take() {
                Some(outcome) => outcome,
                None => panic!("fake content outcome should be consumed exactly once"),
            }
        }
    }

    fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        match mutex.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn profile_reports_gemini_provider_id_and_model() {
        let client = FakeContentClient::replying(Ok("unused".to_string()));
        let transport = GeminiTransport::with_content_client_for_tests("gemini-2.5-pro", client);

        let profile = transport.profile();
        assert_eq!(profile.provider_id, GEMINI_API_PROVIDER_ID);
        assert_eq!(profile.model_id, "gemini-2.5-pro");
    }

    #[test]
    fn blank_model_defaults_to_flash() {
        let client = FakeContentClient::replying(Ok("unused".to_string()));
        let transport = GeminiTransport::with_content_client_for_tests("  ", client);

        assert_eq!(transport.profile().model_id, "gemini-2.5-flash");
    }

    #[test]
    fn send_maps_turns_to_contents_in_order() {
        let client = FakeContentClient::replying(Ok("You said hello.".to_string()));
        let transport = GeminiTransport::with_content_client_for_tests(
            "gemini-2.5-flash",
            Arc::clone(&client) as Arc<dyn ContentClient>,
        );

        let reply = transport
            .send(&[
                Turn::user("Hello"),
                Turn::model("Hi there!"),
                Turn::user("What did I say?"),
            ])
            .expect("reply");

        assert_eq!(reply, "You said hello.");
        let observed = client.observed();
        assert_eq!(
            observed[0].contents,
            vec![
                Content::user("Hello"),
                Content::model("Hi there!"),
                Content::user("What did I say?"),
            ]
        );
    }

    #[test]
    fn blocked_transport_error_maps_to_blocked_generation_error() {
        let client = FakeContentClient::replying(Err(GeminiApiError::Blocked {
            reason: "SAFETY".to_string(),
        }));
        let transport = GeminiTransport::with_content_client_for_tests("gemini-2.5-flash", client);

        let error = transport
            .send(&[Turn::user("unsafe")])
            .expect_err("blocked reply should fail");
        assert_eq!(error, GenerationError::blocked("SAFETY"));
    }

    #[test]
    fn other_transport_errors_map_to_api_errors_with_details() {
        let client = FakeContentClient::replying(Err(GeminiApiError::Unknown(
            "connection refused".to_string(),
        )));
        let transport = GeminiTransport::with_content_client_for_tests("gemini-2.5-flash", client);

        let error = transport
            .send(&[Turn::user("hi")])
            .expect_err("transport error should fail");
        assert!(matches!(
            error,
            GenerationError::Api(message)
                if message == "Gemini API request failed: connection refused"
        ));
    }

    #[test]
    fn construction_rejects_missing_api_key() {
        let error = GeminiTransport::new(GeminiProviderConfig::new("", "gemini-2.5-flash"))
            .err()
            .expect("empty key should fail");

        assert!(error.message().contains("API key is required"));
    }

    #[test]
    fn construction_succeeds_with_key_and_overrides() {
        let config = GeminiProviderConfig::new("key", " gemini-2.0-flash ")
            .with_base_url("http://127.0.0.1:1/v1beta")
            .with_timeout(Duration::from_secs(3));

        let transport = GeminiTransport::new(config).expect("transport");
        assert_eq!(transport.profile().model_id, "gemini-2.0-flash");
    }
}
