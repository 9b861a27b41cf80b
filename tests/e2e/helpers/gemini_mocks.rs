use booktape::domain::audio::bytes_to_base64;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::TEST_API_KEY;

pub const PCM_MIME_TYPE: &str = "audio/L16;codec=pcm;rate=24000";

pub fn generate_path(model: &str) -> String {
    format!("/v1beta/models/{}:generateContent", model)
}

/// A speech response carrying `pcm` as inline base64 audio
pub fn audio_response(pcm: &[u8]) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{
                    "inlineData": { "mimeType": PCM_MIME_TYPE, "data": bytes_to_base64(pcm) }
                }]
            },
            "finishReason": "STOP"
        }]
    })
}

/// A speech response that finished without producing any audio part
pub fn silent_response() -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [] },
            "finishReason": "OTHER"
        }]
    })
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// A structured extraction answer, encoded as JSON text the way the API returns it
pub fn extraction_response(text: &str, detected_language: &str) -> Value {
    let body = json!({ "text": text, "detectedLanguage": detected_language });
    text_response(&body.to_string())
}

/// Answer speech requests whose body contains `marker` with `response`
pub async fn mount_speech(server: &MockServer, model: &str, marker: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(generate_path(model)))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .and(body_string_contains(marker))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Answer every request for `model` with `response`
pub async fn mount_model(server: &MockServer, model: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(generate_path(model)))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
