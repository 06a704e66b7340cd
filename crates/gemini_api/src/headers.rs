use std::collections::BTreeMap;

use crate::config::GeminiApiConfig;
use crate::error::GeminiApiError;

pub const HEADER_API_KEY: &str = "x-goog-api-key";
pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "user-agent";

/// Build a deterministic header map for Gemini transport requests.
///
/// Extra headers are lower-cased and applied last, but can never replace the
/// API key header.
pub fn build_headers(
    config: &GeminiApiConfig,
    user_agent: Option<&str>,
) -> Result<BTreeMap<String, String>, GeminiApiError> {
    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        return Err(GeminiApiError::MissingApiKey);
    }

    let mut headers = BTreeMap::new();
    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let ua = match (user_agent, config.user_agent.as_deref()) {
        (Some(explicit), _) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        (None, Some(explicit)) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        _ => default_user_agent(),
    };
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() || key == HEADER_API_KEY {
            continue;
        }
        headers.insert(key, value.trim().to_owned());
    }

    headers.insert(HEADER_API_KEY.to_owned(), api_key.to_owned());
    Ok(headers)
}

/// Default `User-Agent` value for this transport.
pub fn default_user_agent() -> String {
    format!("persona-chat/{} (gemini_api)", env!("CARGO_PKG_VERSION"))
}
