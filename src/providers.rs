use std::sync::Arc;

use chat_provider::{ModelTransport, ProviderInitError};
use chat_provider_gemini_api::{GeminiProviderConfig, GeminiTransport};
use chat_provider_mock::ScriptedTransport;

use crate::config::{AppConfig, ProviderKind};

/// Builds the transport selected by `config`, authenticated with `api_key`.
pub fn transport_for(
    config: &AppConfig,
    api_key: &str,
) -> Result<Arc<dyn ModelTransport>, ProviderInitError> {
    match config.provider {
        ProviderKind::Gemini => {
            let mut provider_config = GeminiProviderConfig::new(
                api_key,
                config.model.clone().unwrap_or_default(),
            );
            if let Some(base_url) = config.base_url.as_deref() {
                provider_config = provider_config.with_base_url(base_url);
            }
            if let Some(timeout) = config.timeout {
                provider_config = provider_config.with_timeout(timeout);
            }

            Ok(Arc::new(GeminiTransport::new(provider_config)?))
        }
        ProviderKind::Mock => Ok(Arc::new(ScriptedTransport::new())),
    }
}
