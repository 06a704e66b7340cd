use gemini_api::{Content, GenerateContentRequest};
use serde_json::{json, Value};

#[test]
fn single_prompt_payload_has_one_user_turn() {
    let request = GenerateContentRequest::from_prompt("Respond briefly. Be funny. hi");
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(
        body,
        json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Respond briefly. Be funny. hi"}]}
            ]
        })
    );
}

#[test]
fn multi_turn_payload_keeps_turn_order_and_roles() {
    let request = GenerateContentRequest::new(vec![
        Content::user("Hello"),
        Content::model("Hi there!"),
        Content::user("Again"),
    ]);
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(body["contents"][0]["role"], Value::String("user".to_string()));
    assert_eq!(body["contents"][1]["role"], Value::String("model".to_string()));
    assert_eq!(body["contents"][2]["parts"], json!([{"text": "Again"}]));
    assert_eq!(body.as_object().map(|fields| fields.len()), Some(1));
}

#[test]
fn content_joined_text_concatenates_text_parts() {
    let content: Content = serde_json::from_value(json!({
        "role": "model",
        "parts": [{"text": "Hi "}, {"inlineData": {}}, {"text": "there!"}]
    }))
    .expect("content with unknown part fields should parse");

    assert_eq!(content.joined_text().as_deref(), Some("Hi there!"));
}
