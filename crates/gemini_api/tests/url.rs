use gemini_api::generate_content_url;

#[test]
fn url_builds_models_path_under_version_base() {
    assert_eq!(
        generate_content_url(
            "https://generativelanguage.googleapis.com/v1beta",
            "gemini-2.5-flash"
        ),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn url_appends_model_to_models_base_and_strips_trailing_slash() {
    assert_eq!(
        generate_content_url("http://127.0.0.1:9000/v1beta/models/", "gemini-2.5-flash"),
        "http://127.0.0.1:9000/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn url_keeps_explicit_generate_content_endpoint() {
    assert_eq!(
        generate_content_url(
            "http://proxy.local/v1beta/models/custom:generateContent",
            "ignored"
        ),
        "http://proxy.local/v1beta/models/custom:generateContent"
    );
}

#[test]
fn url_accepts_prefixed_model_and_falls_back_on_blank_inputs() {
    assert_eq!(
        generate_content_url("", "models/gemini-2.0-flash"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
    );
    assert_eq!(
        generate_content_url("http://local", "  "),
        "http://local/models/gemini-2.5-flash:generateContent"
    );
}
