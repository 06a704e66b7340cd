/// Default base URL for Gemini REST requests.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when the caller does not pick one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const GENERATE_CONTENT_SUFFIX: &str = ":generateContent";

/// Build the `generateContent` endpoint for `model` under `base`.
///
/// Normalization rules:
/// 1) keep a base that already ends in `:generateContent` unchanged
/// 2) append `/{model}:generateContent` when the path ends in `/models`
/// 3) append `/models/{model}:generateContent` otherwise
///
/// A `models/` prefix on the model id is accepted and stripped.
pub fn generate_content_url(base: &str, model: &str) -> String {
    let base = if base.trim().is_empty() {
        DEFAULT_GEMINI_BASE_URL
    } else {
        base.trim()
    };
    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(GENERATE_CONTENT_SUFFIX) {
        return trimmed.to_string();
    }

    let model = normalize_model_id(model);
    if trimmed.ends_with("/models") {
        return format!("{trimmed}/{model}{GENERATE_CONTENT_SUFFIX}");
    }
    format!("{trimmed}/models/{model}{GENERATE_CONTENT_SUFFIX}")
}

fn normalize_model_id(model: &str) -> &str {
    let model = model.trim();
    let model = model.strip_prefix("models/").unwrap_or(model);
    if model.is_empty() {
        DEFAULT_GEMINI_MODEL
    } else {
        model
    }
}
